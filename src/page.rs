// SPDX: CC0-1.0

use crate::{slider::SliderSpec, Number};
use anyhow::Context;
use chrono::{DateTime, Local};
use std::{
    io::{self, Write},
    process::{self, Child, Stdio},
};

pub const OUTPUT_FILE: &str = "visual.html";
pub const PLOT_RES: [u32; 2] = [1600, 900];

const KATEX_JS: &str = "https://cdnjs.cloudflare.com/ajax/libs/KaTeX/0.16.9/katex.min.js";
const KATEX_CSS: &str = "https://cdnjs.cloudflare.com/ajax/libs/KaTeX/0.16.9/katex.min.css";

const STYLE: &str = r#"<style>
body { margin: 0; font-family: sans-serif; background: #fafafa; }
#layout { display: flex; align-items: flex-start; gap: 16px; padding: 16px; }
#frame { position: relative; flex: 1 1 auto; }
#plot { width: 100%; height: auto; background: #ffffff; border: 1px solid #dddddd; }
#label { position: absolute; left: 80px; top: 40px; font-size: 48px; }
#sliders { display: flex; flex-direction: column; gap: 12px; min-width: 260px; padding-top: 40px; }
.ctl { display: flex; align-items: center; gap: 8px; }
.ctl label { width: 1.5em; text-align: right; }
.ctl input { flex: 1 1 auto; }
.ctl output { min-width: 4em; }
footer { padding: 8px 16px; color: #666666; font-size: 14px; }
</style>
"#;

// TODOO: intermediate tick labels along both axes, not just the endpoints
const CANVAS_JS: &str = r##"const canvas = document.getElementById("plot");
const ctx = canvas.getContext("2d");

function drawLine(x0, y0, x1, y1) {
  ctx.beginPath();
  ctx.moveTo(x0, y0);
  ctx.lineTo(x1, y1);
  ctx.stroke();
}

function redraw() {
  const w = canvas.width;
  const h = canvas.height;
  const pad = 48;
  ctx.clearRect(0, 0, w, h);

  let lo = Infinity;
  let hi = -Infinity;
  for (const v of Y) {
    if (!Number.isFinite(v)) continue;
    if (v < lo) lo = v;
    if (v > hi) hi = v;
  }
  if (!Number.isFinite(lo) || !Number.isFinite(hi)) {
    lo = -1;
    hi = 1;
  } else if (lo === hi) {
    lo -= 1;
    hi += 1;
  }

  const xmin = X[0];
  const xmax = X[X.length - 1];
  const sx = x => pad + (x - xmin) / (xmax - xmin) * (w - 2 * pad);
  const sy = y => h - pad - (y - lo) / (hi - lo) * (h - 2 * pad);

  ctx.lineWidth = 1;
  ctx.strokeStyle = "#888888";
  ctx.strokeRect(pad, pad, w - 2 * pad, h - 2 * pad);
  ctx.strokeStyle = "#cccccc";
  if (xmin < 0 && xmax > 0) drawLine(sx(0), pad, sx(0), h - pad);
  if (lo < 0 && hi > 0) drawLine(pad, sy(0), w - pad, sy(0));

  ctx.fillStyle = "#444444";
  ctx.font = "16px sans-serif";
  ctx.textAlign = "center";
  ctx.fillText(String(xmin), pad, h - pad + 24);
  ctx.fillText(String(xmax), w - pad, h - pad + 24);
  ctx.textAlign = "right";
  ctx.fillText(lo.toPrecision(4), pad - 6, h - pad);
  ctx.fillText(hi.toPrecision(4), pad - 6, pad + 12);

  ctx.lineWidth = 4;
  ctx.strokeStyle = "#1F77B4";
  ctx.beginPath();
  let pen = false;
  for (var i = 0; i < X.length; i++) {
    if (!Number.isFinite(Y[i])) {
      pen = false;
      continue;
    }
    const px = sx(X[i]);
    const py = sy(Y[i]);
    if (pen) {
      ctx.lineTo(px, py);
    } else {
      ctx.moveTo(px, py);
      pen = true;
    }
  }
  ctx.stroke();
}
"##;

const WIRE_JS: &str = r#"for (const el of document.querySelectorAll("input[type=range]")) {
  el.addEventListener("input", () => {
    document.getElementById(el.id.replace("slider-", "value-")).textContent = el.value;
    recompute();
  });
}
recompute();
"#;

/// Everything the standalone page needs, gathered once and written out in
/// one shot.
#[derive(Debug)]
pub struct Page<'a> {
    pub title: &'a str,
    /// element-wise browser form of the function
    pub body_js: &'a str,
    /// KaTeX source for the overlay label
    pub label_tex: &'a str,
    /// normalized human-readable form
    pub shown: &'a str,
    pub sliders: &'a [SliderSpec],
    pub xs: &'a [Number],
    pub generated: DateTime<Local>,
}

impl Page<'_> {
    pub fn write_html<W: Write>(&self, mut out: W) -> io::Result<()> {
        writeln!(out, "<!DOCTYPE html>")?;
        writeln!(out, "<html lang=\"en\">")?;
        writeln!(out, "<head>")?;
        writeln!(out, "<meta charset=\"utf-8\">")?;
        writeln!(out, "<title>{}</title>", self.title)?;
        writeln!(out, "<link rel=\"stylesheet\" href=\"{KATEX_CSS}\">")?;
        writeln!(out, "<script src=\"{KATEX_JS}\"></script>")?;
        out.write_all(STYLE.as_bytes())?;
        writeln!(out, "</head>")?;
        writeln!(out, "<body>")?;

        writeln!(out, "<div id=\"layout\">")?;
        writeln!(out, "<div id=\"frame\">")?;
        writeln!(
            out,
            "<canvas id=\"plot\" width=\"{}\" height=\"{}\"></canvas>",
            PLOT_RES[0], PLOT_RES[1]
        )?;
        writeln!(out, "<div id=\"label\"></div>")?;
        writeln!(out, "</div>")?;

        writeln!(out, "<div id=\"sliders\">")?;
        for spec in self.sliders {
            writeln!(out, "<div class=\"ctl\">")?;
            writeln!(
                out,
                "<label for=\"slider-{name}\">{title}</label>",
                name = spec.name,
                title = spec.title()
            )?;
            writeln!(
                out,
                "<input type=\"range\" id=\"slider-{name}\" min=\"{min}\" max=\"{max}\" step=\"{step}\" value=\"{value}\">",
                name = spec.name,
                min = -spec.size,
                max = spec.size,
                step = spec.step,
                value = spec.value
            )?;
            writeln!(
                out,
                "<output id=\"value-{name}\">{value}</output>",
                name = spec.name,
                value = spec.value
            )?;
            writeln!(out, "</div>")?;
        }
        writeln!(out, "</div>")?;
        writeln!(out, "</div>")?;

        writeln!(
            out,
            "<footer>f(X) = {shown} &middot; generated {stamp}</footer>",
            shown = self.shown,
            stamp = self.generated.format("%Y-%m-%d %H:%M:%S")
        )?;

        writeln!(out, "<script>")?;
        writeln!(out, "\"use strict\";")?;

        write!(out, "const X = [")?;
        for (i, x) in self.xs.iter().enumerate() {
            if i % 10 == 0 {
                writeln!(out)?;
            }
            write!(out, "{x},")?;
        }
        writeln!(out)?;
        writeln!(out, "];")?;
        writeln!(out, "const Y = new Array(X.length).fill(NaN);")?;

        out.write_all(CANVAS_JS.as_bytes())?;

        // one synchronous pass over the whole buffer per slider event
        writeln!(out, "function recompute() {{")?;
        for spec in self.sliders {
            writeln!(
                out,
                "  const {name} = Number(document.getElementById(\"slider-{name}\").value);",
                name = spec.name
            )?;
        }
        writeln!(out, "  for (var i = 0; i < X.length; i++) {{")?;
        writeln!(out, "    Y[i] = {};", self.body_js)?;
        writeln!(out, "  }}")?;
        writeln!(out, "  redraw();")?;
        writeln!(out, "}}")?;

        out.write_all(WIRE_JS.as_bytes())?;
        writeln!(
            out,
            "katex.render({tex}, document.getElementById(\"label\"), {{ throwOnError: false }});",
            tex = js_quote(&format!("f(X) = {}", self.label_tex))
        )?;
        writeln!(out, "</script>")?;

        writeln!(out, "</body>")?;
        writeln!(out, "</html>")?;
        Ok(())
    }
}

fn js_quote(text: &str) -> String {
    let mut ret = String::with_capacity(text.len() + 2);
    ret.push('"');
    for chr in text.chars() {
        match chr {
            '\\' => ret.push_str("\\\\"),
            '"' => ret.push_str("\\\""),
            _ => ret.push(chr),
        }
    }
    ret.push('"');
    ret
}

/// Hand the finished page to the platform's default handler.
pub fn open_page(path: &str) -> anyhow::Result<Child> {
    let mut cmd = if cfg!(target_os = "windows") {
        let mut cmd = process::Command::new("cmd");
        cmd.args(["/C", "start", "", path]);
        cmd
    } else if cfg!(target_os = "macos") {
        let mut cmd = process::Command::new("open");
        cmd.arg(path);
        cmd
    } else {
        let mut cmd = process::Command::new("xdg-open");
        cmd.arg(path);
        cmd
    };
    cmd.stdin(Stdio::null())
        .stdout(Stdio::null())
        .stderr(Stdio::null());
    let child = cmd
        .spawn()
        .context("failed to open the page in the default viewer")?;
    Ok(child)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn render(sliders: &[SliderSpec], xs: &[Number]) -> String {
        let page = Page {
            title: "test",
            body_js: "Math.sin(X[i])*A",
            label_tex: "\\sin(X)\\cdot A",
            shown: "Math.sin(X)*A",
            sliders,
            xs,
            generated: Local::now(),
        };
        let mut buf = Vec::new();
        page.write_html(&mut buf).unwrap();
        String::from_utf8(buf).unwrap()
    }

    #[test]
    fn page_binds_one_constant_and_one_range_input_per_slider() {
        let sliders = [
            SliderSpec::new('A', 50.0, 0.1).unwrap(),
            SliderSpec::new('B', 0.5, 0.001).unwrap(),
        ];
        let html = render(&sliders, &[0.0, 1.0]);

        for name in ['A', 'B'] {
            assert!(html.contains(&format!(
                "const {name} = Number(document.getElementById(\"slider-{name}\").value);"
            )));
            assert!(html.contains(&format!("id=\"slider-{name}\"")));
            assert!(html.contains(&format!("id=\"value-{name}\"")));
        }
        assert!(html.contains("min=\"-50\" max=\"50\" step=\"0.1\" value=\"1\""));
        assert!(html.contains("min=\"-0.5\" max=\"0.5\" step=\"0.001\" value=\"0.5\""));
    }

    #[test]
    fn recompute_loops_the_translated_expression_over_the_buffer() {
        let sliders = [SliderSpec::new('A', 1.0, 0.5).unwrap()];
        let html = render(&sliders, &[0.0, 0.5, 1.0]);
        assert!(html.contains("Y[i] = Math.sin(X[i])*A;"));
        assert!(html.contains("for (var i = 0; i < X.length; i++)"));
    }

    #[test]
    fn latex_label_is_escaped_into_the_script() {
        let sliders = [SliderSpec::new('A', 1.0, 0.5).unwrap()];
        let html = render(&sliders, &[0.0, 1.0]);
        assert!(html.contains(r#"katex.render("f(X) = \\sin(X)\\cdot A""#));
    }

    #[test]
    fn sample_buffer_is_embedded() {
        let sliders = [SliderSpec::new('A', 1.0, 0.5).unwrap()];
        let html = render(&sliders, &[0.0, 0.25, 0.5]);
        assert!(html.contains("0,0.25,0.5,"));
    }
}

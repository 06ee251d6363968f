// SPDX: CC0-1.0

use anyhow::{anyhow, ensure, Context};
use chrono::Local;
use param_plot::{
    page::{self, Page},
    scan,
    shell::{self, Palette},
    slider::{self, SliderSpec},
    translate, typeset, Span,
};
use std::{
    fs::OpenOptions,
    io::{stdout, BufWriter, Write},
    process::ExitCode,
};

const EXAMPLES: [(&str, &str); 5] = [
    ("Logistic", "A/(1+e^(-1*B*(X-C)))"),
    ("Logarithm", "log(X)*A+B"),
    ("Pythagoras", "sqrt(A^2-X^2)"),
    ("Tangent", "tan(X)*A"),
    ("Sine", "sin(X*A+B)*C+D"),
];

fn main() -> ExitCode {
    match try_main() {
        Ok(()) => ExitCode::SUCCESS,
        // the shell already told the user the session is over
        Err(err) if err.is::<shell::Exhausted>() => ExitCode::FAILURE,
        Err(err) => {
            eprintln!("unexpected error: {err}");
            let chain = err.chain();
            if chain.len() > 1 {
                eprintln!();
                eprintln!("context:");
                for it in chain.skip(1) {
                    eprintln!("  {it}");
                }
            }
            ExitCode::FAILURE
        }
    }
}

fn try_main() -> anyhow::Result<()> {
    let palette = Palette::default();
    let mut stdout = BufWriter::new(stdout());

    writeln!(stdout, "Some functions to try:")?;
    for (name, expr) in EXAMPLES {
        writeln!(stdout, "  {name}: {expr}")?;
    }

    let typed = shell::input(
        &mut stdout,
        &palette,
        "Please type in your function.",
        Some("f(X)"),
        None,
    )?;
    let equ = typed.replace('^', "**");
    if let Err(bad) = scan::validate(&equ) {
        return Err(anyhow!(
            "Invalid input: {bad}; a function may only contain letters, digits and ()+-*/^%!"
        ));
    }

    let start = shell::read_number(
        &mut stdout,
        &palette,
        "Where do you want your graph to start at?",
        Some(format!("X{}", shell::SUBSCRIPT[1]).as_str()),
        None,
    )?;
    let end = shell::read_number(
        &mut stdout,
        &palette,
        "Where do you want your graph to end at?",
        Some(format!("X{}", shell::SUBSCRIPT[2]).as_str()),
        None,
    )?;
    let span = Span::new(start, end).map_err(|err| anyhow!("Invalid input: {err}"))?;

    let vars = translate::parameters(&equ);
    ensure!(
        !vars.is_empty(),
        "Invalid input: Function must have at least one adjustable variable"
    );
    writeln!(stdout)?;
    writeln!(stdout, "Here are the variables {vars:?}")?;

    let mut sliders = Vec::with_capacity(vars.len());
    for name in vars {
        let size = shell::read_number(
            &mut stdout,
            &palette,
            &format!("What do you want the size of the slider for {name} to be?"),
            Some(format!("{name}size").as_str()),
            None,
        )?
        .abs();
        ensure!(size != 0.0, "Invalid input: Slider size must not be zero");

        let step_default = slider::default_step(size);
        let step = shell::read_number(
            &mut stdout,
            &palette,
            &format!("How much do you want the slider for {name} to scroll each time?"),
            Some(format!("{name}step").as_str()),
            Some(step_default.as_str()),
        )?
        .abs();

        let spec =
            SliderSpec::new(name, size, step).map_err(|err| anyhow!("Invalid input: {err}"))?;
        sliders.push(spec);
    }

    // advisory only: the page is generated either way, and a name that is
    // truly missing from Math fails in the browser when a slider moves
    for unknown in translate::unknown_names(&equ) {
        match unknown.hint {
            Some(hint) => writeln!(
                stdout,
                "note: '{}' is not a Math member, did you mean '{hint}'?",
                unknown.name
            )?,
            None => writeln!(stdout, "note: '{}' is not a Math member", unknown.name)?,
        }
    }

    let body_js = translate::translate(&equ);
    let shown = translate::display(&equ);
    let label_tex = typeset::latex(&equ);
    let xs = span.samples();

    let html = Page {
        title: env!("CARGO_PKG_NAME"),
        body_js: &body_js,
        label_tex: &label_tex,
        shown: &shown,
        sliders: &sliders,
        xs: &xs,
        generated: Local::now(),
    };

    let mut out = BufWriter::new(
        OpenOptions::new()
            .write(true)
            .create(true)
            .truncate(true)
            .open(page::OUTPUT_FILE)
            .context("failed to open the output page for writing")?,
    );
    html.write_html(&mut out)
        .context("failed to write the output page")?;
    out.flush()?;
    out.get_mut().sync_data()?;
    drop(out);

    writeln!(stdout)?;
    writeln!(stdout, "Final Function:")?;
    writeln!(stdout, "f(X) = {shown}")?;
    writeln!(stdout, "Wrote {}", page::OUTPUT_FILE)?;
    stdout.flush()?;

    page::open_page(page::OUTPUT_FILE)?;

    Ok(())
}

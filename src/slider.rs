// SPDX: CC0-1.0

use crate::Number;
use core::fmt;

/// Decades between a slider's size and its default step.
pub const STEP_SHIFT: i32 = 2;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum SliderErr {
    ZeroSize,
    ZeroStep,
    StepOverSize,
}

impl fmt::Display for SliderErr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ZeroSize => write!(f, "Slider size must not be zero"),
            Self::ZeroStep => write!(f, "Slider step must not be zero"),
            Self::StepOverSize => write!(f, "Slider step must not exceed its size"),
        }
    }
}

/// One parameter variable's control: the slider spans `[-size, +size]`.
#[derive(Clone, Debug, PartialEq)]
pub struct SliderSpec {
    pub name: char,
    pub size: Number,
    pub value: Number,
    pub step: Number,
}

impl SliderSpec {
    pub fn new(name: char, size: Number, step: Number) -> Result<Self, SliderErr> {
        if size == 0.0 {
            Err(SliderErr::ZeroSize)
        } else if step == 0.0 {
            Err(SliderErr::ZeroStep)
        } else if step > size {
            Err(SliderErr::StepOverSize)
        } else {
            let value = if size < 1.0 { size } else { 1.0 };
            Ok(Self {
                name,
                size,
                value,
                step,
            })
        }
    }

    /// Label shown next to the control.
    pub fn title(&self) -> char {
        self.name.to_ascii_lowercase()
    }
}

/// Default step for a slider of the given size: two decades below the
/// size's order of magnitude, as a plain decimal string. The caller
/// guarantees a nonzero size.
pub fn default_step(size: Number) -> String {
    let exponent = size.abs().log10().floor() as i32 - STEP_SHIFT;
    power_of_ten(exponent)
}

fn power_of_ten(exponent: i32) -> String {
    if exponent >= 0 {
        let mut ret = String::from("1");
        for _ in 0..exponent {
            ret.push('0');
        }
        ret
    } else {
        let mut ret = String::from("0.");
        for _ in 0..(-exponent - 1) {
            ret.push('0');
        }
        ret.push('1');
        ret
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn step_sits_two_decades_below_the_size() {
        assert_eq!(default_step(50.0), "0.1");
        assert_eq!(default_step(5.0), "0.01");
        assert_eq!(default_step(0.5), "0.001");
        assert_eq!(default_step(500.0), "1");
        assert_eq!(default_step(5000.0), "10");
    }

    #[test]
    fn default_step_parses_back_to_a_power_of_ten() {
        for size in [0.003, 0.7, 1.0, 2.0, 80.0, 12345.0] {
            let step: Number = default_step(size).parse().unwrap();
            assert!(step > 0.0);
            let decades = step.log10();
            assert!((decades - decades.round()).abs() < 1e-9);
        }
    }

    #[test]
    fn construction_enforces_the_contract() {
        assert_eq!(SliderSpec::new('A', 0.0, 0.1), Err(SliderErr::ZeroSize));
        assert_eq!(SliderSpec::new('A', 5.0, 0.0), Err(SliderErr::ZeroStep));
        assert_eq!(SliderSpec::new('A', 5.0, 6.0), Err(SliderErr::StepOverSize));
        assert!(SliderSpec::new('A', 5.0, 5.0).is_ok());
    }

    #[test]
    fn initial_value_caps_at_one() {
        let spec = SliderSpec::new('A', 50.0, 0.1).unwrap();
        assert_eq!(spec.value, 1.0);

        let spec = SliderSpec::new('B', 0.25, 0.001).unwrap();
        assert_eq!(spec.value, 0.25);
    }

    #[test]
    fn titles_are_lowercased() {
        let spec = SliderSpec::new('Q', 1.0, 0.5).unwrap();
        assert_eq!(spec.title(), 'q');
    }
}

use ordered_float::OrderedFloat;
use serde::{Deserialize, Serialize};

use crate::error::{SceneError, SceneResult};

/// Exactly `count` evenly spaced tick values from 0 to `maximum_radius`.
pub fn explicit_tick_values(maximum_radius: f64, count: usize) -> SceneResult<Vec<f64>> {
    validate_radius(maximum_radius)?;
    if count < 2 {
        return Err(SceneError::InvalidData(format!(
            "explicit tick layout needs at least 2 ticks, got {count}"
        )));
    }

    let step = maximum_radius / (count - 1) as f64;
    let mut values: Vec<f64> = (0..count).map(|index| index as f64 * step).collect();
    // Pin the endpoint exactly; accumulated rounding must not shorten the axis.
    values[count - 1] = maximum_radius;
    Ok(values)
}

/// Tick values at a "nice" 1/2/5-decade step, targeting `target_count` ticks.
///
/// The first tick is always 0; the last is the largest step multiple not
/// exceeding `maximum_radius`.
pub fn auto_tick_values(maximum_radius: f64, target_count: usize) -> SceneResult<Vec<f64>> {
    validate_radius(maximum_radius)?;
    let target_count = target_count.max(2);

    let magnitude = maximum_radius.log10().floor() as i32;
    let mut candidates = Vec::with_capacity(9);
    for exponent in magnitude - 1..=magnitude + 1 {
        for base in [1.0, 2.0, 5.0] {
            candidates.push(base * 10.0_f64.powi(exponent));
        }
    }

    let step = candidates
        .into_iter()
        .min_by_key(|step| {
            let count = (maximum_radius / step).floor() + 1.0;
            (
                OrderedFloat((count - target_count as f64).abs()),
                // Prefer the sparser layout on a cost tie.
                OrderedFloat(-step),
            )
        })
        .unwrap_or(maximum_radius);

    let mut values = Vec::new();
    let mut index = 0_u32;
    loop {
        let value = f64::from(index) * step;
        if value > maximum_radius * (1.0 + 1e-9) {
            break;
        }
        values.push(value);
        index += 1;
    }
    Ok(values)
}

fn validate_radius(maximum_radius: f64) -> SceneResult<()> {
    if !maximum_radius.is_finite() || maximum_radius <= 0.0 {
        return Err(SceneError::InvalidData(format!(
            "maximum radius must be finite and > 0, got {maximum_radius}"
        )));
    }
    Ok(())
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LabelConversion {
    Fixed,
    Scientific,
    General,
}

/// printf-style numeric label format, e.g. `%6.1f`.
///
/// Supports a minimum field width, a precision, the `-` (left justify) and
/// `#` (accepted, ignored) flags, and the `f`/`e`/`g` conversions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LabelFormat {
    pub width: usize,
    pub precision: usize,
    pub conversion: LabelConversion,
    pub left_justify: bool,
}

impl Default for LabelFormat {
    fn default() -> Self {
        Self {
            width: 6,
            precision: 3,
            conversion: LabelConversion::General,
            left_justify: false,
        }
    }
}

impl LabelFormat {
    pub fn parse(spec: &str) -> SceneResult<Self> {
        let invalid =
            |reason: &str| SceneError::InvalidData(format!("label format `{spec}`: {reason}"));

        let body = spec
            .strip_prefix('%')
            .ok_or_else(|| invalid("must start with `%`"))?;

        let mut chars = body.chars().peekable();
        let mut left_justify = false;
        while let Some(&flag) = chars.peek() {
            match flag {
                '-' => left_justify = true,
                '#' => {}
                _ => break,
            }
            chars.next();
        }

        let mut width = 0_usize;
        while let Some(&digit) = chars.peek() {
            let Some(value) = digit.to_digit(10) else {
                break;
            };
            width = width * 10 + value as usize;
            chars.next();
        }

        let mut precision = 6_usize;
        if chars.peek() == Some(&'.') {
            chars.next();
            precision = 0;
            let mut any = false;
            while let Some(&digit) = chars.peek() {
                let Some(value) = digit.to_digit(10) else {
                    break;
                };
                precision = precision * 10 + value as usize;
                chars.next();
                any = true;
            }
            if !any {
                return Err(invalid("`.` must be followed by a precision"));
            }
        }

        let conversion = match chars.next() {
            Some('f') | Some('F') => LabelConversion::Fixed,
            Some('e') | Some('E') => LabelConversion::Scientific,
            Some('g') | Some('G') => LabelConversion::General,
            Some(other) => return Err(invalid(&format!("unsupported conversion `{other}`"))),
            None => return Err(invalid("missing conversion character")),
        };
        if chars.next().is_some() {
            return Err(invalid("trailing characters after conversion"));
        }

        Ok(Self {
            width,
            precision,
            conversion,
            left_justify,
        })
    }

    #[must_use]
    pub fn format(&self, value: f64) -> String {
        let body = match self.conversion {
            LabelConversion::Fixed => format!("{value:.precision$}", precision = self.precision),
            LabelConversion::Scientific => {
                format!("{value:.precision$e}", precision = self.precision)
            }
            LabelConversion::General => format_general(value, self.precision.max(1)),
        };

        if body.len() >= self.width {
            body
        } else if self.left_justify {
            format!("{body:<width$}", width = self.width)
        } else {
            format!("{body:>width$}", width = self.width)
        }
    }
}

/// `%g`-style formatting: `precision` significant digits, trailing zeros
/// trimmed, scientific notation outside the `1e-4..10^precision` window.
fn format_general(value: f64, precision: usize) -> String {
    if value == 0.0 {
        return "0".to_owned();
    }
    if !value.is_finite() {
        return format!("{value}");
    }

    let exponent = value.abs().log10().floor() as i32;
    if exponent < -4 || exponent >= precision as i32 {
        let digits = precision.saturating_sub(1);
        let formatted = format!("{value:.digits$e}");
        match formatted.split_once('e') {
            Some((mantissa, exp)) => format!("{}e{exp}", trim_fraction(mantissa)),
            None => formatted,
        }
    } else {
        let decimals = (precision as i32 - 1 - exponent).max(0) as usize;
        trim_fraction(&format!("{value:.decimals$}")).to_owned()
    }
}

fn trim_fraction(text: &str) -> &str {
    if !text.contains('.') {
        return text;
    }
    text.trim_end_matches('0').trim_end_matches('.')
}

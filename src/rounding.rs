use super::*;

/// Rounds each boundary as far as possible without moving any observation
/// into a different class.
///
/// A boundary must stay strictly above the largest observation below it. The
/// lowest boundary has no such observation, so it may not drop further below
/// the minimum than the width of the first class. A lone boundary has no class
/// width to go by and is unconstrained from below.
///
/// ```text
/// 111.11 → 111.1 → 111 → 110 → 100 → 0
/// ```
pub fn round(breaks: &[Value], data: &[Value]) -> Vec<Value> {
    let sample = Sample::from(data);
    let sorted = sample.values();
    breaks
        .iter()
        .enumerate()
        .map(|(i, &value)| round_value(value, floor(sorted, breaks, i)))
        .collect()
}

/// The value that boundary `i` must remain strictly above.
fn floor(sorted: &[Value], breaks: &[Value], i: usize) -> Value {
    let value = breaks[i];
    match sorted.partition_point(|x| *x < value) {
        0 => match (sorted.first(), breaks.get(i + 1)) {
            (Some(min), Some(next)) => min - (next - value),
            _ => Value::NEG_INFINITY,
        },
        below => sorted[below - 1],
    }
}

/// Zeroes decimal digits of `value` from least to most significant, keeping
/// each step only while the result stays above `floor` and does not exceed
/// `value` itself. Returns the last accepted result.
pub fn round_value(value: Value, floor: Value) -> Value {
    let text = format!("{:.*}", DECIMALS, value);
    let text = match text.contains('.') {
        true => text.trim_end_matches('0').trim_end_matches('.'),
        false => text.as_str(),
    };
    let mut digits = text.chars().collect::<Vec<char>>();
    let mut rounded = value;
    for i in (0..digits.len()).rev() {
        if !digits[i].is_ascii_digit() {
            continue;
        }
        digits[i] = '0';
        match digits.iter().collect::<String>().parse::<Value>() {
            Ok(candidate) if candidate > floor && candidate <= value => rounded = candidate,
            _ => return rounded,
        }
    }
    rounded
}

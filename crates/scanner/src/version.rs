//! Loose version comparison for Node toolchain requirements

/// Numeric components of a version string.
///
/// Leading `v` and range operators are stripped and only the first
/// whitespace-separated token is considered. Parsing stops at the first
/// non-numeric component, so `18.x` yields `[18]`. Returns `None` when not
/// even the major component is numeric.
pub fn components(version: &str) -> Option<Vec<u64>> {
    let token = version.split_whitespace().next()?;
    let stripped = token
        .trim_start_matches(['>', '<', '=', '^', '~'])
        .trim_start_matches('v');

    let parts: Vec<u64> = stripped
        .split('.')
        .map_while(|part| part.parse::<u64>().ok())
        .collect();

    (!parts.is_empty()).then_some(parts)
}

pub fn major(version: &str) -> Option<u64> {
    components(version).and_then(|parts| parts.first().copied())
}

/// Whether `current` satisfies the minimum in `required`.
///
/// Components are compared left to right over the shorter of the two.
/// Requirements that carry no numeric version (`lts/*`, `node`) are treated
/// as satisfied.
pub fn is_compatible(current: &str, required: &str) -> bool {
    let (Some(current), Some(required)) = (components(current), components(required)) else {
        return true;
    };

    for (have, want) in current.iter().zip(required.iter()) {
        if have < want {
            return false;
        }
        if have > want {
            return true;
        }
    }
    true
}

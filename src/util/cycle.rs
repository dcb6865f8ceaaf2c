/// The entry after (or before) `current` in `options`, wrapping at both ends.
/// A value missing from `options` steps from the first entry.
pub fn step<T: Copy + PartialEq>(options: &[T], current: T, forward: bool) -> T {
    let len = options.len();
    if len == 0 {
        return current;
    }
    let idx = options.iter().position(|o| *o == current).unwrap_or(0);
    let next = if forward {
        (idx + 1) % len
    } else {
        (idx + len - 1) % len
    };
    options[next]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wraps_both_ways() {
        let laps = [1, 2, 3];
        assert_eq!(step(&laps, 1, true), 2);
        assert_eq!(step(&laps, 3, true), 1);
        assert_eq!(step(&laps, 1, false), 3);
        assert_eq!(step(&laps, 2, false), 1);
    }

    #[test]
    fn unknown_value_starts_from_first() {
        assert_eq!(step(&['a', 'b', 'c'], 'z', true), 'b');
        assert_eq!(step(&['a', 'b', 'c'], 'z', false), 'c');
    }

    #[test]
    fn single_and_empty_lists() {
        assert_eq!(step(&[7], 7, true), 7);
        assert_eq!(step::<u8>(&[], 4, false), 4);
    }
}

//! Progress is derived from the completion set, never stored.

/// Rounded completion percentage; 0 for an empty path.
pub fn percentage(completed: usize, total: usize) -> u32 {
    if total == 0 {
        return 0;
    }
    ((completed as f64 / total as f64) * 100.0).round() as u32
}

/// Toggles one step index in the completion set. Returns `true` when the
/// step is complete after the toggle. The set stays free of duplicates.
pub fn toggle_step(completed: &mut Vec<i32>, step: i32) -> bool {
    if let Some(pos) = completed.iter().position(|&s| s == step) {
        completed.remove(pos);
        false
    } else {
        completed.push(step);
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_percentage_rounds() {
        assert_eq!(percentage(0, 6), 0);
        assert_eq!(percentage(1, 6), 17); // 16.66 rounds up
        assert_eq!(percentage(2, 6), 33);
        assert_eq!(percentage(3, 6), 50);
        assert_eq!(percentage(6, 6), 100);
    }

    #[test]
    fn test_percentage_empty_path_is_zero() {
        assert_eq!(percentage(0, 0), 0);
    }

    #[test]
    fn test_toggle_adds_then_removes() {
        let mut completed = vec![0, 2];
        assert!(toggle_step(&mut completed, 1));
        assert_eq!(completed, vec![0, 2, 1]);
        assert!(!toggle_step(&mut completed, 2));
        assert_eq!(completed, vec![0, 1]);
    }

    #[test]
    fn test_toggle_never_duplicates() {
        let mut completed = Vec::new();
        toggle_step(&mut completed, 3);
        toggle_step(&mut completed, 3);
        toggle_step(&mut completed, 3);
        assert_eq!(completed, vec![3]);
    }
}

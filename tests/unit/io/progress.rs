//! Tests for optional progress bars

#[cfg(test)]
mod tests {
    use eddytracks::io::configuration::MIN_PROGRESS_ITEMS;
    use eddytracks::io::progress::Progress;

    // Tests hidden progress ignores updates
    // Verified by counting updates without a bar
    #[test]
    fn test_hidden_progress() {
        let progress = Progress::hidden();
        progress.inc();
        progress.inc();
        progress.finish();

        assert!(!progress.is_visible());
        assert_eq!(progress.position(), 0);
    }

    // Tests short loops get no bar
    // Verified by comparing with > instead of >=
    #[test]
    fn test_threshold() {
        assert!(!Progress::new("frames", MIN_PROGRESS_ITEMS - 1, true).is_visible());
        assert!(Progress::new("frames", MIN_PROGRESS_ITEMS, true).is_visible());
    }

    // Tests quiet runs get no bar
    // Verified by ignoring the visible flag
    #[test]
    fn test_quiet() {
        assert!(!Progress::new("frames", MIN_PROGRESS_ITEMS * 10, false).is_visible());
    }

    // Tests visible bars count items
    // Verified by incrementing by two
    #[test]
    fn test_position_advances() {
        let progress = Progress::new("frames", MIN_PROGRESS_ITEMS, true);
        for _ in 0..5 {
            progress.inc();
        }
        assert_eq!(progress.position(), 5);
        progress.finish();
    }
}

pub mod reconcile {
    /// Cron expression for counter reconciliation
    /// Runs every hour at the top of the hour
    pub const CRON_EXPRESSION: &str = "0 0 * * * *";
}

use crate::{AppViewModel, DerivedView, HealthStatus};

/// Rendering surface driven by the core. Implementations only display what
/// they are given; the core never reads anything back.
pub trait PresentationSink {
    /// Replaces the table and KPIs. `total` is the raw server total.
    fn render_rows(&mut self, view: &DerivedView, total: Option<u64>);
    fn set_status(&mut self, text: &str);
    fn set_health(&mut self, state: HealthStatus, label: &str);
    /// Enables or disables the ETL trigger control.
    fn set_run_enabled(&mut self, enabled: bool);
}

/// Pushes a full view model into a sink.
pub fn present(view: &AppViewModel, sink: &mut dyn PresentationSink) {
    sink.set_health(view.health, view.health_label);
    sink.set_status(&view.status);
    sink.set_run_enabled(view.run_enabled);
    sink.render_rows(&view.derived, view.derived.total_from_server);
}

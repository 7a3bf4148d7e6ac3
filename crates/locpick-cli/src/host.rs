use locpick_core::{Coordinate, FormPatch, LocationForm};
use locpick_selector::{Diagnostic, Notice, RadiusOverlay, SelectorHost};

/// Terminal stand-in for the admin page: keeps the form in memory and logs
/// what a real page would render.
#[derive(Debug, Default)]
pub(crate) struct ConsoleHost {
    pub(crate) form: LocationForm,
    pub(crate) notices: Vec<Notice>,
}

impl ConsoleHost {
    pub(crate) fn new(form: LocationForm) -> Self {
        Self {
            form,
            notices: Vec::new(),
        }
    }
}

impl SelectorHost for ConsoleHost {
    fn patch_form(&mut self, patch: FormPatch) {
        tracing::info!(?patch, "form updated");
        self.form.apply(&patch);
    }

    fn recenter_map(&mut self, center: Coordinate, zoom: Option<u8>) {
        tracing::info!(%center, ?zoom, "map recentered");
    }

    fn render_radius(&mut self, overlay: Option<RadiusOverlay>) {
        match overlay {
            Some(o) => tracing::info!(center = %o.center, radius_m = o.radius_m, "radius drawn"),
            None => tracing::debug!("radius cleared"),
        }
    }

    fn show_notice(&mut self, notice: Notice) {
        tracing::warn!(message = %notice.message, "notice");
        self.notices.push(notice);
    }

    fn diagnostic(&mut self, event: &Diagnostic) {
        tracing::debug!(?event, "selector diagnostic");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn patches_are_applied_to_the_form() {
        let mut host = ConsoleHost::default();
        host.patch_form(FormPatch::position(Coordinate::new(11.0, 75.0)));
        host.patch_form(FormPatch::place_name("Kozhikode, Kerala, India"));
        assert_eq!(host.form.coordinate(), Some(Coordinate::new(11.0, 75.0)));
        assert_eq!(host.form.place_name, "Kozhikode, Kerala, India");
    }

    #[test]
    fn notices_are_kept() {
        let mut host = ConsoleHost::default();
        host.show_notice(Notice::new("denied"));
        assert_eq!(host.notices, vec![Notice::new("denied")]);
    }
}

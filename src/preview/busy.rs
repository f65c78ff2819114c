/// A show/hide busy signal (spinner) owned by whoever renders the dialog.
pub trait BusyIndicator {
    fn show(&mut self);
    fn hide(&mut self);
}

/// Indicator that does nothing; used when the spinner is turned off.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoBusyIndicator;

impl BusyIndicator for NoBusyIndicator {
    fn show(&mut self) {}
    fn hide(&mut self) {}
}

impl<B: BusyIndicator + ?Sized> BusyIndicator for Box<B> {
    fn show(&mut self) {
        (**self).show();
    }

    fn hide(&mut self) {
        (**self).hide();
    }
}

//! [`FormView`] wired to Leptos signals, the toast stack and the router.

use std::rc::Rc;

use geoflip_client::{FormView, Notification};
use leptos::*;
use leptos_router::{use_navigate, NavigateOptions};

use crate::state::Toasts;

/// Must be created inside a component under `<Router>`.
#[derive(Clone)]
pub struct SignalView {
    loading: WriteSignal<bool>,
    toasts: Toasts,
    navigate: Rc<dyn Fn(&str)>,
}

impl SignalView {
    pub fn new(loading: WriteSignal<bool>) -> Self {
        let navigate = use_navigate();
        Self {
            loading,
            toasts: expect_context::<Toasts>(),
            navigate: Rc::new(move |route: &str| navigate(route, NavigateOptions::default())),
        }
    }
}

impl FormView for SignalView {
    fn set_loading(&self, loading: bool) {
        self.loading.set(loading);
    }

    fn notify(&self, notification: Notification) {
        self.toasts.push(notification);
    }

    fn navigate(&self, route: &str) {
        log::info!("➡️  {}", route);
        (self.navigate)(route);
    }
}

//! Toast notifications

use leptos::*;
use sig_core::{Notification, NotificationVariant, Notifier};
use std::time::Duration;

const TOAST_LIFETIME: Duration = Duration::from_secs(5);

/// Notifier that queues toasts in a signal; each toast expires on its own
#[derive(Clone, Copy)]
pub struct ToastNotifier {
    toasts: RwSignal<Vec<(u64, Notification)>>,
    next_id: StoredValue<u64>,
}

impl ToastNotifier {
    pub fn new() -> Self {
        Self {
            toasts: create_rw_signal(Vec::new()),
            next_id: store_value(0),
        }
    }

    pub fn toasts(&self) -> RwSignal<Vec<(u64, Notification)>> {
        self.toasts
    }

    pub fn dismiss(&self, id: u64) {
        self.toasts.update(|toasts| toasts.retain(|(toast_id, _)| *toast_id != id));
    }
}

impl Notifier for ToastNotifier {
    fn notify(&self, notification: Notification) {
        let id = self.next_id.get_value();
        self.next_id.set_value(id + 1);
        self.toasts.update(|toasts| toasts.push((id, notification)));

        let this = *self;
        set_timeout(move || this.dismiss(id), TOAST_LIFETIME);
    }
}

fn variant_class(variant: NotificationVariant) -> &'static str {
    match variant {
        NotificationVariant::Default => "bg-white border-gray-200 text-gray-900",
        NotificationVariant::Warning => "bg-amber-50 border-amber-300 text-amber-900",
        NotificationVariant::Destructive => "bg-red-600 border-red-600 text-white",
    }
}

#[component]
pub fn Toasts(notifier: ToastNotifier) -> impl IntoView {
    view! {
        <div class="fixed bottom-4 right-4 z-50 flex flex-col space-y-2 w-80">
            <For
                each=move || notifier.toasts().get()
                key=|(id, _)| *id
                children=move |(id, toast)| {
                    view! {
                        <div class=format!("border rounded-lg shadow p-4 {}", variant_class(toast.variant))>
                            <div class="flex justify-between items-start">
                                <p class="font-semibold">{toast.title}</p>
                                <button class="text-sm opacity-70" on:click=move |_| notifier.dismiss(id)>
                                    "×"
                                </button>
                            </div>
                            <p class="text-sm mt-1">{toast.description}</p>
                        </div>
                    }
                }
            />
        </div>
    }
}

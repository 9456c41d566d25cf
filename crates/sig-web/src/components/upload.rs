//! Drop zone with preview and processing overlay

use leptos::*;
use sig_core::SurfaceSnapshot;

#[component]
pub fn SignatureUpload(
    snapshot: ReadSignal<SurfaceSnapshot>,
    on_file: Callback<web_sys::File>,
    on_drag: Callback<bool>,
    on_analyze: Callback<()>,
    on_reset: Callback<()>,
) -> impl IntoView {
    let input_ref = create_node_ref::<html::Input>();

    let processing = move || snapshot.with(|s| s.is_processing());
    let has_preview = move || snapshot.with(|s| s.preview_url.is_some());

    let zone_class = move || {
        snapshot.with(|s| {
            let mut class = String::from(
                "border-2 border-dashed rounded-xl h-64 flex flex-col items-center justify-center p-6 cursor-pointer transition-colors",
            );
            if s.dragging {
                class.push_str(" border-blue-500 bg-blue-50");
            } else if s.preview_url.is_some() {
                class.push_str(" border-blue-400 bg-blue-50/50");
            } else {
                class.push_str(" border-gray-300");
            }
            if !s.interactive {
                class.push_str(" opacity-50 pointer-events-none");
            }
            class
        })
    };

    let open_picker = move |_| {
        if let Some(input) = input_ref.get() {
            input.click();
        }
    };

    let on_drop = move |ev: ev::DragEvent| {
        ev.prevent_default();
        on_drag.call(false);
        let file = ev
            .data_transfer()
            .and_then(|transfer| transfer.files())
            .and_then(|files| files.get(0));
        if let Some(file) = file {
            on_file.call(file);
        }
    };

    let on_change = move |_| {
        let file = input_ref
            .get()
            .and_then(|input| input.files())
            .and_then(|files| files.get(0));
        if let Some(file) = file {
            on_file.call(file);
        }
    };

    let reset = move |ev: ev::MouseEvent| {
        ev.stop_propagation();
        if let Some(input) = input_ref.get() {
            input.set_value("");
        }
        on_reset.call(());
    };

    view! {
        <div class="w-full max-w-2xl mx-auto">
            <div
                class=zone_class
                on:dragover=move |ev: ev::DragEvent| {
                    ev.prevent_default();
                    on_drag.call(true);
                }
                on:dragleave=move |ev: ev::DragEvent| {
                    ev.prevent_default();
                    on_drag.call(false);
                }
                on:drop=on_drop
                on:click=open_picker
            >
                <input
                    node_ref=input_ref
                    type="file"
                    class="hidden"
                    accept="image/*"
                    on:change=on_change
                    prop:disabled=processing
                />
                <Show
                    when=has_preview
                    fallback=|| view! {
                        <h3 class="font-medium text-lg mb-2">"Upload a signature"</h3>
                        <p class="text-gray-500 text-center text-sm mb-2">
                            "Drag and drop an image file here, or click to browse"
                        </p>
                        <p class="text-xs text-gray-400">"Supports JPG, PNG, and other image formats"</p>
                    }
                >
                    <div class="relative w-full h-full flex items-center justify-center">
                        <img
                            src=move || snapshot.with(|s| s.preview_url.clone().unwrap_or_default())
                            alt="Signature preview"
                            class="max-h-full max-w-full object-contain rounded-lg"
                        />
                        <Show when=processing>
                            <div class="absolute inset-0 bg-white/50 flex items-center justify-center rounded-lg">
                                <div class="flex flex-col items-center">
                                    <div class="h-10 w-10 rounded-full border-4 border-blue-200 border-t-blue-600 animate-spin mb-4"></div>
                                    <p class="text-sm font-medium">"Analyzing signature..."</p>
                                </div>
                            </div>
                        </Show>
                    </div>
                </Show>
            </div>

            <Show when=has_preview>
                <div class="mt-4 flex justify-center">
                    <button
                        class="text-sm px-4 py-2 rounded-full bg-gray-200 hover:bg-gray-300 mr-3"
                        on:click=reset
                        prop:disabled=processing
                    >
                        "Upload a different image"
                    </button>
                    <button
                        class="text-sm px-4 py-2 rounded-full bg-blue-600 text-white hover:bg-blue-700"
                        on:click=move |ev: ev::MouseEvent| {
                            ev.stop_propagation();
                            on_analyze.call(());
                        }
                        prop:disabled=processing
                    >
                        {move || if processing() { "Processing..." } else { "Analyze Signature" }}
                    </button>
                </div>
            </Show>
        </div>
    }
}

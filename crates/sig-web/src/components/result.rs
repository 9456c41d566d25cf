//! Verdict card

use leptos::*;
use sig_core::ResultView;

#[component]
pub fn SignatureResult(
    result: ResultView,
    on_download: Callback<()>,
    on_reset: Callback<()>,
) -> impl IntoView {
    let ResultView {
        status_label,
        status_class,
        confidence_percent,
        band,
        sub_scores,
        reference_signature,
        ..
    } = result;

    view! {
        <div class="w-full max-w-2xl mx-auto mt-8">
            <div class="bg-white rounded-xl shadow p-6">
                <div class="text-center mb-6">
                    <div class=format!("inline-flex items-center justify-center px-4 py-1 rounded-full text-sm font-medium mb-2 {}", status_class)>
                        {status_label}
                    </div>
                    <h3 class="text-2xl font-semibold mb-2">"Analysis Results"</h3>
                </div>

                <div class="mb-8">
                    <div class="flex justify-between items-center mb-2">
                        <span class="text-sm font-medium">"Confidence Score"</span>
                        <span class=format!("text-sm font-bold {}", band.text_class())>
                            {confidence_percent} "%"
                        </span>
                    </div>
                    <div class="h-2 bg-gray-200 rounded-full overflow-hidden">
                        <div
                            class=format!("h-full rounded-full transition-all duration-1000 {}", band.bar_class())
                            style=format!("width: {}%", confidence_percent)
                        ></div>
                    </div>
                </div>

                {(!sub_scores.is_empty()).then(|| view! {
                    <div class="grid grid-cols-1 md:grid-cols-3 gap-4 mb-6">
                        {sub_scores.into_iter().map(|bar| view! {
                            <div class="bg-gray-50 p-4 rounded-lg">
                                <div class="text-sm text-gray-500 mb-1">{bar.label}</div>
                                <div class="text-xl font-medium">{bar.percent} "%"</div>
                            </div>
                        }).collect_view()}
                    </div>
                })}

                {reference_signature.map(|url| view! {
                    <div class="border-t pt-6 mt-6">
                        <div class="text-sm font-medium mb-3">"Compared against reference signature:"</div>
                        <div class="bg-gray-50 p-3 rounded-lg">
                            <img src=url alt="Reference signature" class="max-h-32 mx-auto object-contain"/>
                        </div>
                    </div>
                })}

                <div class="mt-6 flex justify-center">
                    <button
                        class="text-sm px-6 py-2 rounded-full bg-gray-200 hover:bg-gray-300 mr-4"
                        on:click=move |_| on_download.call(())
                    >
                        "Download Report"
                    </button>
                    <button
                        class="text-sm px-6 py-2 rounded-full bg-blue-600 text-white hover:bg-blue-700"
                        on:click=move |_| on_reset.call(())
                    >
                        "Verify Another"
                    </button>
                </div>
            </div>
        </div>
    }
}

//! Signature verification page

use crate::api;
use crate::components::{SignatureResult, SignatureUpload, ToastNotifier, Toasts};
use crate::download;
use crate::preview::BlobUrlStore;
use js_sys::Uint8Array;
use leptos::*;
use sig_core::media::resolve_mime;
use sig_core::presentation::present;
use sig_core::report::generate_report;
use sig_core::{
    CoreError, ImageFile, ReportFormat, SurfaceSnapshot, VerificationReport, VerificationSession,
    VerificationVerdict,
};
use wasm_bindgen::JsValue;
use wasm_bindgen_futures::JsFuture;

type Session = VerificationSession<BlobUrlStore, ToastNotifier>;

async fn read_file(file: &web_sys::File) -> Result<ImageFile, JsValue> {
    let buffer = JsFuture::from(file.array_buffer()).await?;
    let bytes = Uint8Array::new(&buffer).to_vec();
    let mime_type = resolve_mime(Some(file.type_().as_str()), &bytes);
    Ok(ImageFile::new(file.name(), mime_type, bytes))
}

#[component]
pub fn VerifyPage() -> impl IntoView {
    let notifier = ToastNotifier::new();
    let session = store_value(Session::new(BlobUrlStore::default(), notifier));
    let analyzer = store_value(api::analyzer());

    let (snapshot, set_snapshot) = create_signal(SurfaceSnapshot::default());
    let (verdict, set_verdict) = create_signal(None::<VerificationVerdict>);

    // Mirror the session into signals after every transition
    let sync = move || {
        let (next_snapshot, next_verdict) =
            session.with_value(|s| (s.snapshot(), s.verdict().cloned()));
        set_snapshot.set(next_snapshot);
        set_verdict.set(next_verdict);
    };
    sync();

    let analyze = move || {
        let Some(Ok(ticket)) = session.try_update_value(|s| s.begin_analysis()) else {
            return;
        };
        sync();

        let analyzer = analyzer.get_value();
        spawn_local(async move {
            let outcome = analyzer.submit(ticket.file()).await;
            session.update_value(|s| {
                if let Err(CoreError::StaleTicket(attempt)) = s.complete_analysis(ticket, outcome) {
                    tracing::warn!("Ignoring result of superseded analysis #{}", attempt);
                }
            });
            sync();
        });
    };

    let on_file = Callback::new(move |file: web_sys::File| {
        spawn_local(async move {
            let image = match read_file(&file).await {
                Ok(image) => image,
                Err(e) => {
                    tracing::error!("Failed to read {}: {:?}", file.name(), e);
                    return;
                }
            };

            let accepted = session
                .try_update_value(|s| s.select_file(image).is_ok())
                .unwrap_or(false);
            sync();
            if accepted {
                analyze();
            }
        });
    });

    let on_drag = Callback::new(move |over: bool| {
        session.update_value(|s| {
            if over {
                s.drag_enter();
            } else {
                s.drag_leave();
            }
        });
        sync();
    });

    let on_analyze = Callback::new(move |_: ()| analyze());

    let on_reset = Callback::new(move |_: ()| {
        session.update_value(|s| {
            if let Err(e) = s.discard() {
                tracing::warn!("Cannot reset: {}", e);
            }
        });
        sync();
    });

    let on_download = Callback::new(move |_: ()| {
        let report = session.with_value(|s| {
            let file = s.surface().candidate()?.file();
            let verdict = s.verdict()?.clone();
            Some(VerificationReport::new(file, verdict, chrono::Utc::now()))
        });
        let Some(report) = report else {
            return;
        };

        let saved = generate_report(&report, ReportFormat::Markdown)
            .map_err(|e| JsValue::from_str(&e.to_string()))
            .and_then(|content| {
                download::save_text(
                    "signature-report.md",
                    ReportFormat::Markdown.content_type(),
                    &content,
                )
            });
        if let Err(e) = saved {
            tracing::error!("Failed to download report: {:?}", e);
        }
    });

    view! {
        <section class="text-center mb-16">
            <div class="inline-flex items-center px-3 py-1 rounded-full bg-blue-100 text-blue-700 text-sm font-medium mb-4">
                "Powered by Machine Learning"
            </div>
            <h1 class="text-4xl md:text-5xl font-bold tracking-tight mb-6 max-w-4xl mx-auto">
                "Advanced Signature " <span class="text-blue-600">"Verification"</span>
            </h1>
            <p class="text-lg text-gray-500 max-w-2xl mx-auto mb-8">
                "Upload a signature image and it will be analyzed for authenticity."
            </p>
        </section>

        <div class="max-w-5xl mx-auto">
            <div class="bg-white rounded-2xl p-6 md:p-8 shadow mb-12">
                <SignatureUpload
                    snapshot=snapshot
                    on_file=on_file
                    on_drag=on_drag
                    on_analyze=on_analyze
                    on_reset=on_reset
                />
                {move || present(verdict.get().as_ref()).map(|result| view! {
                    <SignatureResult result=result on_download=on_download on_reset=on_reset/>
                })}
            </div>

            <section id="how-it-works" class="py-12">
                <h2 class="text-2xl md:text-3xl font-bold text-center mb-12">"How It Works"</h2>
                <div class="grid grid-cols-1 md:grid-cols-3 gap-8">
                    <Step
                        title="Upload"
                        body="Upload a signature image in any common format, such as JPG or PNG."
                    />
                    <Step
                        title="Analyze"
                        body="The signature is scored on style, pressure and flow patterns."
                    />
                    <Step
                        title="Verify"
                        body="Get a verdict with a confidence score and a downloadable report."
                    />
                </div>
            </section>
        </div>

        <Toasts notifier=notifier/>
    }
}

#[component]
fn Step(title: &'static str, body: &'static str) -> impl IntoView {
    view! {
        <div class="bg-white rounded-xl p-6 shadow border">
            <h3 class="text-xl font-semibold mb-2">{title}</h3>
            <p class="text-gray-500">{body}</p>
        </div>
    }
}

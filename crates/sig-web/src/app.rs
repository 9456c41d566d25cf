//! Main application component

use crate::components::Header;
use crate::pages::VerifyPage;
use leptos::*;

#[component]
pub fn App() -> impl IntoView {
    view! {
        <div class="min-h-screen flex flex-col bg-gray-50">
            <Header/>
            <main class="flex-1 w-full max-w-7xl mx-auto px-4 sm:px-6 lg:px-8 py-12">
                <VerifyPage/>
            </main>
        </div>
    }
}

//! Page header

use leptos::*;

#[component]
pub fn Header() -> impl IntoView {
    view! {
        <header class="w-full py-6 px-4 sm:px-6 md:px-8">
            <div class="max-w-7xl mx-auto flex items-center justify-between">
                <div class="flex items-center space-x-2">
                    <div class="h-8 w-8 rounded-lg bg-blue-600"></div>
                    <span class="text-xl font-medium tracking-tight">"SignScan"</span>
                </div>
                <nav class="hidden md:flex space-x-8">
                    <a href="#" class="text-gray-500 hover:text-gray-900">"Home"</a>
                    <a href="#how-it-works" class="text-gray-500 hover:text-gray-900">"How It Works"</a>
                </nav>
            </div>
        </header>
    }
}

use leptos::prelude::*;

use super::context::use_auth;

/// Показывает содержимое только авторизованному пользователю
#[component]
pub fn RequireAuth(
    #[prop(optional, into)] fallback: ViewFn,
    children: ChildrenFn,
) -> impl IntoView {
    let (auth_state, _) = use_auth();

    view! {
        <Show
            when=move || auth_state.with(|state| state.access_token.is_some())
            fallback=fallback
        >
            {children()}
        </Show>
    }
}

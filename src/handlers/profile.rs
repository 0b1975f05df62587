use axum::{Extension, response::Html};

use crate::{utils::jwt::Claims, views::render_profile};

/// Renders the current user's profile page.
/// Claims are injected by `cookie_auth_middleware`.
pub async fn get_profile(Extension(claims): Extension<Claims>) -> Html<String> {
    Html(render_profile(&claims.email, &claims.roles))
}

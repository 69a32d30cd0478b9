use axum::{
    Router,
    routing::{get, post, put},
};
use tower_http::services::ServeDir;

use foodgram_core::health::{healthz, readyz};
use foodgram_core::middleware::{propagate_request_id_layer, request_id_layer, trace_layer};

use crate::handlers::{
    collection::{
        add_favorite, add_to_cart, download_shopping_cart, remove_favorite, remove_from_cart,
    },
    ingredient::{get_ingredient, search_ingredients},
    recipe::{create_recipe, delete_recipe, get_recipe, list_recipes, update_recipe},
    short_link::{get_short_link, resolve_short_link},
    subscription::{list_subscriptions, subscribe, unsubscribe},
    tag::{get_tag, list_tags},
    user::{create_user, delete_avatar, get_me, get_user, list_users, update_avatar},
};
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    let media = state
        .media_url
        .starts_with('/')
        .then(|| (state.media_url.clone(), ServeDir::new(&state.media.root)));

    let router = Router::new()
        // Health
        .route("/healthz", get(healthz))
        .route("/readyz", get(readyz))
        // Users
        .route("/users", get(list_users).post(create_user))
        .route("/users/me", get(get_me))
        .route("/users/me/avatar", put(update_avatar).delete(delete_avatar))
        .route("/users/subscriptions", get(list_subscriptions))
        .route("/users/{id}", get(get_user))
        .route("/users/{id}/subscribe", post(subscribe).delete(unsubscribe))
        // Tags & ingredients
        .route("/tags", get(list_tags))
        .route("/tags/{id}", get(get_tag))
        .route("/ingredients", get(search_ingredients))
        .route("/ingredients/{id}", get(get_ingredient))
        // Recipes
        .route("/recipes", get(list_recipes).post(create_recipe))
        .route("/recipes/download_shopping_cart", get(download_shopping_cart))
        .route(
            "/recipes/{id}",
            get(get_recipe)
                .put(update_recipe)
                .patch(update_recipe)
                .delete(delete_recipe),
        )
        .route("/recipes/{id}/favorite", post(add_favorite).delete(remove_favorite))
        .route(
            "/recipes/{id}/shopping_cart",
            post(add_to_cart).delete(remove_from_cart),
        )
        .route("/recipes/{id}/get-link", get(get_short_link))
        // Short links
        .route("/r/{code}", get(resolve_short_link))
        .route("/r/{code}/", get(resolve_short_link));

    let router = match media {
        Some((prefix, dir)) => router.nest_service(&prefix, dir),
        None => router,
    };

    router
        .with_state(state)
        .layer(trace_layer())
        .layer(propagate_request_id_layer())
        .layer(request_id_layer())
}

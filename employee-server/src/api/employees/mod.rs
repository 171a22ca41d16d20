//! Employee API Module
//!
//! | Method | Path | Handler |
//! |--------|------|---------|
//! | POST | /api/employees | create |
//! | GET | /api/employees | list |
//! | GET | /api/employees/{id} | get_by_id |
//! | PUT | /api/employees/{id} | update |
//! | DELETE | /api/employees/{id} | delete |
//! | GET | /api/employees/paginated | paginated |
//! | POST | /api/employees/search | search |
//! | GET | /api/employees/search/name | search_by_name |
//! | GET | /api/employees/search/department | search_by_department |

mod handler;

use axum::{
    Router,
    routing::{get, post},
};

use crate::state::AppState;

/// Employee router
pub fn router() -> Router<AppState> {
    Router::new().nest("/api/employees", routes())
}

fn routes() -> Router<AppState> {
    Router::new()
        .route("/", get(handler::list).post(handler::create))
        .route("/paginated", get(handler::paginated))
        .route("/search", post(handler::search))
        .route("/search/name", get(handler::search_by_name))
        .route("/search/department", get(handler::search_by_department))
        .route(
            "/{id}",
            get(handler::get_by_id)
                .put(handler::update)
                .delete(handler::delete),
        )
}

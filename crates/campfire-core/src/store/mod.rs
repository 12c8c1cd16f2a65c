// ── State store ──
//
// Pure slice reducers composed into one dispatch pipeline, with
// push-based change notification.

mod favorites;
mod slice;
mod state;
mod stream;

pub use favorites::{Favorites, FavoritesAction};
pub use slice::{FetchStatus, ResourceState, SliceAction};
pub use state::{Action, AppState, Collection, Store};
pub use stream::StateStream;

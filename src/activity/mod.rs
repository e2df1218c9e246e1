pub mod favorites;
pub mod requests;

pub use favorites::FavoritesService;
pub use requests::{ContactForm, RequestService, ViewingForm};

pub mod giphy;
pub mod inspirobot;
pub mod local_images;
pub mod title;
pub mod wikihow;

pub use giphy::GiphySource;
pub use inspirobot::InspirobotSource;
pub use local_images::LocalImageSource;
pub use title::TitleSource;
pub use wikihow::WikihowSource;

mod article;
mod category;
mod language;
mod page;
mod title;

pub use article::*;
pub use category::*;
pub use language::*;
pub use page::*;
pub use title::*;

pub mod career_link;

pub use career_link::CareerLink;

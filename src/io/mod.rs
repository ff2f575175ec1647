//! Reading wheel and rail profiles from text files.

pub use self::profile_loader::{load_profile, parse_profile, LoadError, ProfileFormat};

mod profile_loader;

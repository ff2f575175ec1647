//! Wheel and rail cross-section profiles.

pub use self::profile::{align_profiles, AlignmentError, Profile, ProfileError};

mod profile;

//! Play-queue ownership: the ordered song list, the cursor and the
//! play-next override.

mod cursor;

pub use cursor::PlaylistCursor;

#[cfg(test)]
mod tests;

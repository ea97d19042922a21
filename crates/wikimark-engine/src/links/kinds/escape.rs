pub struct Escape;

impl Escape {
    /// Placed directly before a link to keep it literal.
    pub const MARKER: char = '~';

    /// Characters after which a link may start.
    pub const FRONT_BOUNDARY: [char; 2] = ['|', '('];

    /// True when a link may start right after `prev` (`None` = start of text).
    pub fn is_front_boundary(prev: Option<char>) -> bool {
        match prev {
            None => true,
            Some(c) => c.is_whitespace() || Self::FRONT_BOUNDARY.contains(&c),
        }
    }
}

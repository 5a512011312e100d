//! Hand-built boards shared by the unit tests

/// Diagonal stripes: no runs, and no single swap can make one
pub const STRIPES: &str = "
    ROYGWBPR
    OYGWBPRO
    YGWBPROY
    GWBPROYG
    WBPROYGW
    BPROYGWB
    PROYGWBP
    ROYGWBPR";

/// One legal move: (0, 2) <-> (1, 2) lines up three Red on the top row
pub const ONE_MOVE: &str = "
    RRYGWBPR
    OYRWBPRO
    YGWBPROY
    GWBPROYG
    WBPROYGW
    BPROYGWB
    PROYGWBP
    ROYGWBPR";

/// Two equal-valued moves (three Red each): (0, 2) <-> (1, 2) and (6, 5) <-> (7, 5)
pub const TIED_MOVES: &str = "
    RRYGWBPR
    OYRWBPRO
    YGWBPROY
    GWBPROYG
    WBPROYGW
    BPROYGWB
    PROYGRBP
    ROYRRBPR";

/// Three Red at the top versus three White at the bottom: (6, 5) <-> (7, 5) wins
pub const UNEQUAL_MOVES: &str = "
    RRYGWBPR
    OYRWBPRO
    YGWBPROY
    GWBPROYG
    WBPROYGW
    BPROYGWB
    PROYGWBP
    ROYWWBPR";

/// Red at (3, 3) scores the same moving down or right; no other pair scores
pub const DOWN_RIGHT_TIE: &str = "
    ........
    ........
    ........
    ...R.RR.
    .RR.....
    ........
    ........
    ........";

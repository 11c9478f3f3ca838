//! Level layouts shared by the end-to-end tests.

/// Two tanks in open ground with a wall and a tree between them. No enemy
/// team, so the level counts as complete from the first frame.
pub const OPEN_FIELD: &str = "
............
............
............
............
.P...W..T.P.
............
............
";

/// A single tank facing an enemy turret behind a wall line.
pub const FORTRESS: &str = "
..........
....E.....
..WWWWWW..
..........
..........
....P.....
";

/// Player 1 sits under an enemy turret; player 2 is out of the turret's
/// range but close enough to shoot it down.
pub const TURRET_ALLEY: &str = "
..........
P.E......P
..........
";

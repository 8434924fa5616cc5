/// Identifies one logical sync exchange. Unique among concurrently live
/// requests; recycled after resolution so header-encoded ids stay small.
pub type RequestId = u16;

/// Identity of one game client in the session roster.
pub type ParticipantId = u16;

/// Seconds of elapsed game time, monotonically increasing, supplied by the
/// host on every manager entry point.
pub type GameTime = f32;

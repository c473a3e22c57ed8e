pub mod participants;

pub use participants::{
    MatchField, NewParticipant, ParticipantRow, UnknownMatchField, UpdateBirthDateRequest,
};

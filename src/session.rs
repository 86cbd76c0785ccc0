/// Session-oriented choreography API.
pub mod choreographer;

//! `bn-grid` — fixed-size 2-D cell array with a current/pending buffer pair.
//!
//! # Crate layout
//!
//! | Module    | Contents                                        |
//! |-----------|-------------------------------------------------|
//! | [`cell`]  | `CellKind`, `Cell`, `CellCoord`                 |
//! | [`world`] | `GridWorld`, `CellCounts`                       |
//!
//! # Buffer discipline
//!
//! Rules read only `Cell::current` and write only `Cell::pending`;
//! [`GridWorld::commit`] then copies pending into current for every cell at
//! once.  User interaction bypasses the buffer with
//! [`GridWorld::set_immediate`], which writes both.

pub mod cell;
pub mod world;


pub use cell::{Cell, CellCoord, CellKind};
pub use world::{CellCounts, GridWorld};

//! Process definitions for behavioral hardware descriptions.
//!
//! A [`Process`] represents a VHDL process or Verilog always block,
//! containing behavioral statements that describe sequential or combinational logic.

use crate::ids::{ProcessId, SignalId};
use crate::stmt::Statement;
use aion_common::Ident;
use aion_source::Span;
use serde::{Deserialize, Serialize};

/// The kind of process, determining how it is synthesized.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ProcessKind {
    /// Combinational logic (`always_comb`, VHDL combinational process).
    Combinational,
    /// Sequential logic (`always_ff`, VHDL clocked process).
    Sequential,
    /// Latched logic (`always_latch`).
    Latched,
    /// Initial block (testbench only, not synthesizable).
    Initial,
}

/// A clock/reset edge type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Edge {
    /// Rising edge (0→1).
    Posedge,
    /// Falling edge (1→0).
    Negedge,
    /// Both edges.
    Both,
}

/// A signal with its associated edge in a sensitivity list.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EdgeSensitivity {
    /// The signal being monitored.
    pub signal: SignalId,
    /// The edge to trigger on.
    pub edge: Edge,
}

/// The sensitivity list of a process.
///
/// Determines when the process is re-evaluated.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum Sensitivity {
    /// Sensitive to all read signals (`always_comb`, `process(all)`).
    All,
    /// Sensitive to specific signal edges (`always_ff @(posedge clk)`).
    EdgeList(Vec<EdgeSensitivity>),
    /// Sensitive to specific signal values (`process(a, b, c)`).
    SignalList(Vec<SignalId>),
}

/// A behavioral process in a module.
///
/// Processes contain sequential statements that describe hardware behavior.
/// During synthesis, combinational processes become logic gates and
/// sequential processes become flip-flops.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Process {
    /// The unique ID of this process within its module.
    pub id: ProcessId,
    /// An optional process label/name.
    pub name: Option<Ident>,
    /// The kind of process (combinational, sequential, etc.).
    pub kind: ProcessKind,
    /// The process body.
    pub body: Statement,
    /// The sensitivity list.
    pub sensitivity: Sensitivity,
    /// The source span of the process declaration.
    pub span: Span,
}

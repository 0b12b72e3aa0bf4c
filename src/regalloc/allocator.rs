//! Linear scan register allocation
//!
//! # Algorithm
//!
//! Per function, independently:
//! 1. Compute live intervals for each virtual register
//! 2. Sort intervals by start position (ties: register id ascending)
//! 3. For each interval, retire expired actives and try a free register
//! 4. At capacity, spill the interval with the furthest endpoint among the
//!    active set and the candidate

use tracing::{debug, trace};

use crate::ir::{Builder, FunctionBuilder, Item, Reg};

use super::liveness::{live_intervals, LiveInterval};
use super::table::{Placement, RegisterTable, RegisterTableEntry};

/// Size of one spill slot in bytes
const SPILL_SLOT_SIZE: u64 = 8;

/// Linear scan register allocator over a finished [`Builder`].
///
/// Maps every virtual register of every function onto a fixed pool of named
/// physical registers, spilling to sequential stack slots when the pool is
/// exhausted. A pool of size zero is legal and spills everything.
#[derive(Debug)]
pub struct LinearScanAllocator {
    /// Physical register names, in preference order
    pool: Vec<String>,
    /// Currently active intervals with their pool index, sorted by end point
    active: Vec<(LiveInterval, usize)>,
    /// Free pool indices
    free: Vec<usize>,
    /// Next spill slot byte offset within the current function's frame
    next_spill: u64,
}

impl LinearScanAllocator {
    /// Create an allocator over the given physical register file
    pub fn new(pool: Vec<String>) -> Self {
        Self {
            pool,
            active: Vec::new(),
            free: Vec::new(),
            next_spill: 0,
        }
    }

    /// Number of physical registers available
    pub fn capacity(&self) -> usize {
        self.pool.len()
    }

    /// Assign every virtual register in `builder` a physical register or a
    /// spill slot. The builder must be finished: statement indices and
    /// register ids are read as final.
    pub fn allocate(&mut self, builder: &Builder) -> RegisterTable {
        let mut table = RegisterTable::default();
        for item in builder.items() {
            if let Item::Function(func) = item {
                self.allocate_function(func, &mut table);
            }
        }
        table
    }

    fn allocate_function(&mut self, func: &FunctionBuilder, table: &mut RegisterTable) {
        self.active.clear();
        self.free = (0..self.pool.len()).collect();
        self.next_spill = 0;

        let intervals = live_intervals(func);
        // Placements keyed by register id, ascending (BTreeMap on Reg).
        let mut placements: std::collections::BTreeMap<Reg, Placement> =
            std::collections::BTreeMap::new();

        for interval in intervals {
            self.expire_old_intervals(interval.start);

            if self.free.is_empty() {
                self.spill_at_interval(interval, &mut placements);
            } else {
                let slot = self.take_lowest_free();
                placements.insert(interval.reg, Placement::Allocated(self.pool[slot].clone()));
                self.admit(interval, slot);
            }
        }

        trace!(
            function = func.name(),
            registers = placements.len(),
            spill_bytes = self.next_spill,
            "linear scan finished"
        );

        for (reg, placement) in placements {
            table.entries.push(RegisterTableEntry {
                function: func.name().to_string(),
                name: reg.to_string(),
                placement,
            });
        }
    }

    /// Retire active intervals whose end point is before `position`,
    /// returning their registers to the free pool.
    fn expire_old_intervals(&mut self, position: usize) {
        let mut i = 0;
        while i < self.active.len() {
            if self.active[i].0.end < position {
                let (_, slot) = self.active.remove(i);
                self.free.push(slot);
            } else {
                i += 1;
            }
        }
    }

    /// Spill either the candidate or the active interval with the furthest
    /// endpoint. An active interval is evicted only when its end is strictly
    /// beyond the candidate's; on ties the candidate spills.
    fn spill_at_interval(
        &mut self,
        interval: LiveInterval,
        placements: &mut std::collections::BTreeMap<Reg, Placement>,
    ) {
        // Active is sorted by end point; the furthest candidate is last.
        match self.active.last() {
            Some((furthest, _)) if furthest.end > interval.end => {
                let (victim, slot) = self.active.pop().unwrap();
                debug!(
                    victim = %victim.reg,
                    victim_end = victim.end,
                    candidate = %interval.reg,
                    candidate_end = interval.end,
                    "spilling furthest-endpoint interval"
                );
                placements.insert(victim.reg, Placement::Spilled(self.take_spill_slot()));
                placements.insert(interval.reg, Placement::Allocated(self.pool[slot].clone()));
                self.admit(interval, slot);
            }
            _ => {
                debug!(candidate = %interval.reg, "spilling candidate interval");
                placements.insert(interval.reg, Placement::Spilled(self.take_spill_slot()));
            }
        }
    }

    fn admit(&mut self, interval: LiveInterval, slot: usize) {
        self.active.push((interval, slot));
        self.active.sort_by_key(|(iv, _)| (iv.end, iv.reg.0));
    }

    fn take_lowest_free(&mut self) -> usize {
        let pos = self
            .free
            .iter()
            .enumerate()
            .min_by_key(|(_, slot)| **slot)
            .map(|(pos, _)| pos)
            .expect("take_lowest_free on empty pool");
        self.free.swap_remove(pos)
    }

    fn take_spill_slot(&mut self) -> u64 {
        let offset = self.next_spill;
        self.next_spill += SPILL_SLOT_SIZE;
        offset
    }
}

//! Write coalescing
//!
//! A batch touches pins in some order; a [`FlushPlan`] remembers each
//! touched port once, in the order it was first touched. Flushing the plan
//! costs one bus write per port no matter how many of its pins changed.

use heapless::Vec;

use crate::registry::{PinRegistry, PortId, MAX_PORTS};

/// Ordered set of ports awaiting a flush
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct FlushPlan {
    ports: Vec<PortId, MAX_PORTS>,
}

impl FlushPlan {
    /// Empty plan
    pub const fn new() -> Self {
        Self { ports: Vec::new() }
    }

    /// Plan covering every registered port, in registration order
    pub fn all(registry: &PinRegistry) -> Self {
        let mut plan = Self::new();
        for (id, _) in registry.ports() {
            plan.touch(id);
        }
        plan
    }

    /// Record that a port's buffer changed
    pub fn touch(&mut self, port: PortId) {
        if !self.ports.contains(&port) {
            // Ids are arena indices, so there are never more than MAX_PORTS
            let _ = self.ports.push(port);
        }
    }

    /// Number of distinct ports
    pub fn len(&self) -> usize {
        self.ports.len()
    }

    /// True if no port was touched
    pub fn is_empty(&self) -> bool {
        self.ports.is_empty()
    }

    /// Ports in first-touched order
    pub fn iter(&self) -> impl Iterator<Item = PortId> + '_ {
        self.ports.iter().copied()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::registry::LogicalPin;
    use proptest::prelude::*;

    #[test]
    fn test_first_touch_order() {
        let mut registry = PinRegistry::new();
        let [a, b] = registry.register_chip(0x20).unwrap();
        let [c, _] = registry.register_chip(0x21).unwrap();

        let mut plan = FlushPlan::new();
        for port in [b, a, b, c, a] {
            plan.touch(port);
        }

        let order: Vec<PortId, 4> = plan.iter().collect();
        assert_eq!(&order[..], &[b, a, c]);
    }

    #[test]
    fn test_all_ports() {
        let mut registry = PinRegistry::new();
        registry.register_chip(0x20).unwrap();
        registry.register_chip(0x21).unwrap();

        let plan = FlushPlan::all(&registry);
        assert_eq!(plan.len(), 4);
        assert!(plan.iter().eq(registry.ports().map(|(id, _)| id)));
        assert!(FlushPlan::all(&PinRegistry::new()).is_empty());
    }

    static PORT_A_PINS: [LogicalPin; 8] = [1, 2, 3, 4, 5, 6, 7, 8];

    proptest! {
        #[test]
        fn prop_pins_on_one_port_coalesce(pins in proptest::sample::subsequence(&PORT_A_PINS[..], 1..=8)) {
            let mut registry = PinRegistry::new();
            let [a, _] = registry.register_chip(0x20).unwrap();

            let mut plan = FlushPlan::new();
            for pin in &pins {
                plan.touch(registry.resolve(*pin).unwrap().port);
            }

            prop_assert_eq!(plan.len(), 1);
            prop_assert_eq!(plan.iter().next(), Some(a));
        }
    }
}

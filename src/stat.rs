use tracing::info;

#[derive(Debug, Clone, Default)]
pub(crate) struct Stats {
    pub(crate) cost: usize,
    pub(crate) time_us: usize,
    pub(crate) expand_nodes: usize,
}

impl Stats {
    pub(crate) fn print(&self) {
        info!(
            "Cost {:?} Time(microseconds) {:?} Expand nodes number {:?}",
            self.cost, self.time_us, self.expand_nodes
        );
    }
}

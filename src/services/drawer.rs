//! Lot drawer lifecycle: closed/open state around a [`LotSizeAggregator`]

use tracing::{debug, info};

use super::lot_aggregator::LotSizeAggregator;
use crate::types::{DrawerMode, SavedLot, SizeRow, Specification};

/// Receiver of the drawer's outcome
pub trait DrawerHost {
    /// Called once per confirmed save
    fn on_save(&mut self, payload: SavedLot);

    /// Called on cancel or dismissal
    fn on_close(&mut self);
}

/// What the host hands the drawer when it is mounted
#[derive(Debug, Clone, Default)]
pub struct DrawerProps {
    pub mode: DrawerMode,
    pub product_name: String,
    pub specification: Specification,
    pub initial_lot_sizes: Vec<SizeRow>,
    pub size_options: Vec<String>,
}

#[derive(Debug)]
enum DrawerState {
    Closed,
    Open(LotSizeAggregator),
}

/// The lot drawer.
///
/// Closed holds no rows. Opening seeds a fresh working list from the props;
/// closing throws it away. Only [`save`](Self::save) hands data back out.
#[derive(Debug)]
pub struct LotDrawer {
    props: DrawerProps,
    state: DrawerState,
}

impl LotDrawer {
    pub fn new(props: DrawerProps) -> Self {
        Self {
            props,
            state: DrawerState::Closed,
        }
    }

    pub fn props(&self) -> &DrawerProps {
        &self.props
    }

    pub fn is_open(&self) -> bool {
        matches!(self.state, DrawerState::Open(_))
    }

    /// Header text, e.g. "Edit Lot Details - Ring"
    pub fn title(&self) -> String {
        let mut title = format!("{} Lot Details", self.props.mode.verb());
        if !self.props.product_name.is_empty() {
            title.push_str(" - ");
            title.push_str(&self.props.product_name);
        }
        title
    }

    /// Drive the open flag. Seeds rows on closed→open only; repeating the
    /// current state keeps in-progress edits.
    pub fn set_open(&mut self, open: bool) {
        match (self.is_open(), open) {
            (false, true) => {
                let aggregator = LotSizeAggregator::seeded(
                    self.props.initial_lot_sizes.clone(),
                    self.props.specification.clone(),
                    self.props.size_options.clone(),
                );
                debug!(
                    mode = ?self.props.mode,
                    rows = aggregator.len(),
                    "lot drawer opened"
                );
                self.state = DrawerState::Open(aggregator);
            }
            (true, false) => {
                debug!("lot drawer closed");
                self.state = DrawerState::Closed;
            }
            _ => {}
        }
    }

    pub fn aggregator(&self) -> Option<&LotSizeAggregator> {
        match &self.state {
            DrawerState::Open(aggregator) => Some(aggregator),
            DrawerState::Closed => None,
        }
    }

    pub fn aggregator_mut(&mut self) -> Option<&mut LotSizeAggregator> {
        match &mut self.state {
            DrawerState::Open(aggregator) => Some(aggregator),
            DrawerState::Closed => None,
        }
    }

    /// Whether the save affordance is enabled
    pub fn can_save(&self) -> bool {
        self.aggregator().is_some_and(LotSizeAggregator::is_valid)
    }

    /// Discard the working list and notify the host
    pub fn cancel(&mut self, host: &mut impl DrawerHost) {
        self.set_open(false);
        host.on_close();
    }

    /// Hand the lot to the host and close. Returns false (and does nothing)
    /// while the drawer is closed or any row is incomplete.
    pub fn save(&mut self, host: &mut impl DrawerHost) -> bool {
        let payload = match self.aggregator() {
            Some(aggregator) if aggregator.is_valid() => aggregator.save(),
            _ => return false,
        };
        info!(
            rows = payload.lot_sizes.len(),
            total_sets = payload.totals.total_sets,
            total_gross_wt = payload.totals.total_gross_wt,
            "lot saved"
        );
        host.on_save(payload);
        self.set_open(false);
        true
    }
}

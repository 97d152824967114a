use crate::Map;
use robid_core::models::{Hour, StorageId, TimeSlot, WindId};
use std::fmt;

/// The name dimension of the variable space.
///
/// Together with an [`IndexTuple`] this addresses exactly one decision
/// variable; the flat `(hour, sub-interval)` index space is shared by all
/// per-slot quantities even where hourly invariance later equalizes them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(rename_all = "snake_case")
)]
pub enum Quantity {
    /// Hourly energy sold day-ahead, MWh.
    DaSell,
    /// Hourly energy bought day-ahead, MWh.
    DaBuy,
    /// Hourly reserve capacity offered, MW.
    Reserve,
    /// Per-hour auxiliary carrying the worst-case real-time margin.
    RobustValue,
    /// Aggregate up-regulation deployment per slot, MW.
    UpDeployment,
    /// Aggregate down-regulation deployment per slot, MW.
    DownDeployment,
    /// Storage day-ahead charging power.
    DaCharge,
    /// Storage day-ahead discharging power.
    DaDischarge,
    /// Storage reserve capacity offered while charging.
    ReserveCharge,
    /// Storage reserve capacity offered while discharging.
    ReserveDischarge,
    /// Storage up-regulation deployed by reducing charge.
    UpCharge,
    /// Storage up-regulation deployed by extra discharge.
    UpDischarge,
    /// Storage down-regulation deployed by extra charge.
    DownCharge,
    /// Storage down-regulation deployed by reducing discharge.
    DownDischarge,
    /// State of charge under day-ahead flows only (split accounting).
    EnergyDayAhead,
    /// State of charge under realized flows.
    EnergyRealized,
    /// Storage charging commitment.
    ChargeFlag,
    /// Storage discharging commitment.
    DischargeFlag,
    /// Wind day-ahead schedule.
    WindDaSchedule,
    /// Wind reserve capacity offered.
    WindReserve,
    /// Wind up-regulation deployed.
    WindUp,
    /// Wind down-regulation deployed.
    WindDown,
    /// Wind realized output.
    WindRealized,
    /// Wind realization not delivered to any market (split accounting).
    WindSpillage,
    /// Wind market-participation commitment.
    WindCommit,
}

impl Quantity {
    /// Short snake-case label, used for display and LP column names.
    pub fn label(&self) -> &'static str {
        match self {
            Quantity::DaSell => "da_sell",
            Quantity::DaBuy => "da_buy",
            Quantity::Reserve => "reserve",
            Quantity::RobustValue => "robust_value",
            Quantity::UpDeployment => "up_deployment",
            Quantity::DownDeployment => "down_deployment",
            Quantity::DaCharge => "da_charge",
            Quantity::DaDischarge => "da_discharge",
            Quantity::ReserveCharge => "reserve_charge",
            Quantity::ReserveDischarge => "reserve_discharge",
            Quantity::UpCharge => "up_charge",
            Quantity::UpDischarge => "up_discharge",
            Quantity::DownCharge => "down_charge",
            Quantity::DownDischarge => "down_discharge",
            Quantity::EnergyDayAhead => "energy_da",
            Quantity::EnergyRealized => "energy_rt",
            Quantity::ChargeFlag => "charge_flag",
            Quantity::DischargeFlag => "discharge_flag",
            Quantity::WindDaSchedule => "wind_da",
            Quantity::WindReserve => "wind_reserve",
            Quantity::WindUp => "wind_up",
            Quantity::WindDown => "wind_down",
            Quantity::WindRealized => "wind_rt",
            Quantity::WindSpillage => "wind_spill",
            Quantity::WindCommit => "wind_commit",
        }
    }

    /// The kind every variable of this quantity is declared with.
    pub fn kind(&self) -> VarKind {
        match self {
            Quantity::ChargeFlag | Quantity::DischargeFlag | Quantity::WindCommit => {
                VarKind::Binary
            }
            _ => VarKind::Continuous,
        }
    }
}

impl fmt::Display for Quantity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// The index dimension of the variable space.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(rename_all = "snake_case")
)]
pub enum IndexTuple {
    /// An hourly quantity.
    Hour(Hour),
    /// A per-slot aggregate quantity.
    Slot(TimeSlot),
    /// A storage-unit quantity at a slot.
    Storage(TimeSlot, StorageId),
    /// A wind-unit quantity at a slot.
    Wind(TimeSlot, WindId),
}

impl IndexTuple {
    /// The hour this tuple falls in.
    pub fn hour(&self) -> Hour {
        match self {
            IndexTuple::Hour(t) => *t,
            IndexTuple::Slot(slot)
            | IndexTuple::Storage(slot, _)
            | IndexTuple::Wind(slot, _) => slot.hour,
        }
    }

    /// The slot this tuple falls in, if it is sub-hourly.
    pub fn slot(&self) -> Option<TimeSlot> {
        match self {
            IndexTuple::Hour(_) => None,
            IndexTuple::Slot(slot)
            | IndexTuple::Storage(slot, _)
            | IndexTuple::Wind(slot, _) => Some(*slot),
        }
    }
}

impl fmt::Display for IndexTuple {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            IndexTuple::Hour(t) => write!(f, "(t={})", t.0),
            IndexTuple::Slot(slot) => write!(f, "(t={}, j={})", slot.hour.0, slot.interval),
            IndexTuple::Storage(slot, s) => {
                write!(f, "(t={}, j={}, {})", slot.hour.0, slot.interval, s)
            }
            IndexTuple::Wind(slot, w) => {
                write!(f, "(t={}, j={}, {})", slot.hour.0, slot.interval, w)
            }
        }
    }
}

/// A fully-qualified variable address: name plus index.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct VarKey {
    /// The name dimension.
    pub quantity: Quantity,
    /// The index dimension.
    pub index: IndexTuple,
}

impl VarKey {
    /// An hourly-quantity key.
    pub fn hourly(quantity: Quantity, hour: Hour) -> Self {
        Self {
            quantity,
            index: IndexTuple::Hour(hour),
        }
    }

    /// A per-slot-quantity key.
    pub fn slot(quantity: Quantity, slot: TimeSlot) -> Self {
        Self {
            quantity,
            index: IndexTuple::Slot(slot),
        }
    }

    /// A storage-quantity key.
    pub fn storage(quantity: Quantity, slot: TimeSlot, unit: StorageId) -> Self {
        Self {
            quantity,
            index: IndexTuple::Storage(slot, unit),
        }
    }

    /// A wind-quantity key.
    pub fn wind(quantity: Quantity, slot: TimeSlot, unit: WindId) -> Self {
        Self {
            quantity,
            index: IndexTuple::Wind(slot, unit),
        }
    }
}

impl fmt::Display for VarKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.quantity, self.index)
    }
}

/// Whether a variable is continuous or a 0/1 decision.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum VarKind {
    /// Continuous on `[lower, upper]`.
    Continuous,
    /// Binary.
    Binary,
}

/// A dense handle into the registry, assigned in declaration order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct VarId(pub(crate) u32);

impl VarId {
    /// The position of this variable in declaration order.
    pub fn as_usize(self) -> usize {
        self.0 as usize
    }
}

/// Everything declared about one variable.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct VarInfo {
    /// The variable's address.
    pub key: VarKey,
    /// Continuous or binary.
    pub kind: VarKind,
    /// Lower bound (0 for every quantity in this model).
    pub lower: f64,
    /// Upper bound; `f64::INFINITY` when uncapped.
    pub upper: f64,
}

/// The declaration-ordered variable table of a model.
///
/// Ids are handed out in declaration order and the key map iterates in that
/// same order, which is what makes two assemblies of the same inputs produce
/// identical models.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct VariableRegistry {
    info: Vec<VarInfo>,
    ids: Map<VarKey, VarId>,
}

impl VariableRegistry {
    pub(crate) fn declare(&mut self, key: VarKey, kind: VarKind, lower: f64, upper: f64) -> VarId {
        let id = VarId(self.info.len() as u32);
        let previous = self.ids.insert(key, id);
        debug_assert!(previous.is_none(), "variable {key} declared twice");
        self.info.push(VarInfo {
            key,
            kind,
            lower,
            upper,
        });
        id
    }

    /// Look up the id of a key, if declared.
    pub fn id(&self, key: &VarKey) -> Option<VarId> {
        self.ids.get(key).copied()
    }

    /// The declaration record behind an id.
    pub fn info(&self, id: VarId) -> &VarInfo {
        &self.info[id.as_usize()]
    }

    /// Number of declared variables.
    pub fn len(&self) -> usize {
        self.info.len()
    }

    /// Whether nothing has been declared.
    pub fn is_empty(&self) -> bool {
        self.info.is_empty()
    }

    /// All variables in declaration order.
    pub fn iter(&self) -> impl Iterator<Item = (VarId, &VarInfo)> {
        self.info
            .iter()
            .enumerate()
            .map(|(i, info)| (VarId(i as u32), info))
    }

    /// Number of declared variables of a kind.
    pub fn kind_count(&self, kind: VarKind) -> usize {
        self.info.iter().filter(|info| info.kind == kind).count()
    }

    /// Number of declared variables of a quantity.
    pub fn quantity_count(&self, quantity: Quantity) -> usize {
        self.info
            .iter()
            .filter(|info| info.key.quantity == quantity)
            .count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn declaration_order_is_id_order() {
        let mut registry = VariableRegistry::default();
        let slot = TimeSlot {
            hour: Hour(1),
            interval: 1,
        };
        let a = registry.declare(
            VarKey::hourly(Quantity::DaSell, Hour(1)),
            VarKind::Continuous,
            0.0,
            f64::INFINITY,
        );
        let b = registry.declare(
            VarKey::storage(Quantity::ChargeFlag, slot, StorageId(0)),
            VarKind::Binary,
            0.0,
            1.0,
        );
        assert_eq!(a.as_usize(), 0);
        assert_eq!(b.as_usize(), 1);
        assert_eq!(registry.id(&VarKey::hourly(Quantity::DaSell, Hour(1))), Some(a));
        assert_eq!(registry.kind_count(VarKind::Binary), 1);
        assert_eq!(registry.quantity_count(Quantity::DaSell), 1);

        let keys: Vec<_> = registry.iter().map(|(_, info)| info.key).collect();
        assert_eq!(keys[0].quantity, Quantity::DaSell);
        assert_eq!(keys[1].quantity, Quantity::ChargeFlag);
    }

    #[test]
    fn display_forms() {
        let slot = TimeSlot {
            hour: Hour(3),
            interval: 7,
        };
        let key = VarKey::storage(Quantity::DaCharge, slot, StorageId(1));
        assert_eq!(key.to_string(), "da_charge(t=3, j=7, s1)");
        assert_eq!(key.index.hour(), Hour(3));
        assert_eq!(key.index.slot(), Some(slot));

        let hourly = VarKey::hourly(Quantity::RobustValue, Hour(12));
        assert_eq!(hourly.to_string(), "robust_value(t=12)");
        assert_eq!(hourly.index.slot(), None);
    }
}

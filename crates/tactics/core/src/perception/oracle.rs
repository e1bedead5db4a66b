use crate::entity::EntityId;
use crate::grid::CellRef;

/// Observers are agents; they share the entity id space.
pub type ObserverId = EntityId;

/// What the occupancy tracker needs from perception.
///
/// Implementations answer from state computed earlier in the tick; the
/// tracker only reads.
pub trait PerceptionOracle: Send + Sync {
    /// Every observer currently able to perceive.
    fn observers(&self) -> Vec<ObserverId>;

    /// True when `observer` has an unobstructed, in-cone view of `cell`.
    fn visible_from_observer(&self, observer: ObserverId, cell: CellRef) -> bool;

    /// Awareness of `entity` held by `observer`, in `[0, 1]`.
    fn awareness_of(&self, observer: ObserverId, entity: EntityId) -> f32;

    /// True when any observer is fully aware of `entity`.
    fn is_immediate(&self, entity: EntityId) -> bool {
        self.observers()
            .into_iter()
            .any(|observer| self.awareness_of(observer, entity) >= 1.0)
    }
}

mod archive_card;
mod archive_modal;
mod board;
mod card_meta;
mod column;
mod empty_state;
mod filter_bar;
mod stats_bar;
mod task_card;
mod task_modal;

pub use archive_card::ArchiveCard;
pub use archive_modal::ArchiveModal;
pub use board::Board;
pub use card_meta::CardMeta;
pub use column::Column;
pub use empty_state::EmptyState;
pub use filter_bar::FilterBar;
pub use stats_bar::StatsBar;
pub use task_card::TaskCard;
pub use task_modal::TaskModal;

use yew::MouseEvent;

/// True when the click landed on the
/// element owning the handler, not on
/// one of its children.
pub(crate) fn is_backdrop_click(
  event: &MouseEvent
) -> bool {
  match (
    event.target(),
    event.current_target()
  ) {
    | (Some(target), Some(current)) => {
      target == current
    }
    | _ => false
  }
}

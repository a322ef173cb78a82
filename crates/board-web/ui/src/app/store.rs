use std::ops::Deref;
use std::rc::Rc;

use board_shared::{
  BoardAction,
  BoardState
};
use yew::Reducible;

/// Yew handle around the shared board
/// state; every event becomes a
/// [`BoardAction`].
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BoardStore(BoardState);

impl Reducible for BoardStore {
  type Action = BoardAction;

  fn reduce(
    self: Rc<Self>,
    action: Self::Action
  ) -> Rc<Self> {
    let mut next =
      Rc::unwrap_or_clone(self);
    next.0.reduce(action);
    Rc::new(next)
  }
}

impl Deref for BoardStore {
  type Target = BoardState;

  fn deref(&self) -> &BoardState {
    &self.0
  }
}

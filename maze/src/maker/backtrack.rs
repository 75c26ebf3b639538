use super::{Chooser, MazeMaker, START};

pub trait Backtrack {
    fn backtrack(&mut self);
}

impl<C: Chooser + ?Sized> Backtrack for MazeMaker<'_, C> {
    fn backtrack(&mut self) {
        self.visit_cell(START);
        let mut stack = Vec::with_capacity(self.grid.cell_count());
        stack.push(START);

        // The top of the stack is the current cell. A dead end pops it and
        // the walk resumes from the cell below.
        while let Some(curr) = stack.pop() {
            if let Some(next) = self.pick_neighbor(curr) {
                stack.push(curr);
                self.remove_wall_between(curr, next);
                self.visit_cell(next);
                stack.push(next);
            }
        }

        debug_assert!(
            self.grid.cells().all(|cell| cell.visited),
            "every cell should be reachable from the start"
        );
        debug_assert_eq!(self.grid.passages(), self.grid.cell_count() - 1);
    }
}

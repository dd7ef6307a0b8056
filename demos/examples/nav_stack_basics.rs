// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Navigation stack basics.
//!
//! Pushes a few screens, lets the back gesture pop them, and prints every surface call so
//! the two-phase transition (tag, mount, swap tags, unmount) is visible. A navigation bar
//! follows along.
//!
//! Run:
//! - `cargo run -p understory_demos --example nav_stack_basics`

use std::cell::RefCell;
use std::rc::Rc;
use std::time::Duration;

use understory_nav_stack::{Frame, FrameHost, NavBar, NavigationStack, StackSurface, TransitionTag};
use understory_signal::Gestures;

#[derive(Debug, PartialEq)]
struct Screen(&'static str);

impl Frame for Screen {
    fn activate(&mut self) {
        println!("  [{}] active", self.0);
    }

    fn deactivate(&mut self) {
        println!("  [{}] removed", self.0);
    }

    fn title(&self) -> Option<&str> {
        Some(self.0)
    }
}

struct Printer;

impl StackSurface for Printer {
    type Node = &'static str;

    fn mount(&mut self, node: &&'static str) {
        println!("  mount {node}");
    }

    fn unmount(&mut self, node: &&'static str) {
        println!("  unmount {node}");
    }

    fn set_transition(&mut self, node: &&'static str, tag: Option<TransitionTag>) {
        println!("  {node}: {tag:?}");
    }

    fn set_shown(&mut self, shown: bool) {
        println!("  shown={shown}");
    }
}

impl FrameHost<Screen> for Printer {
    fn host(&mut self, screen: &Screen) -> Option<&'static str> {
        Some(screen.0)
    }
}

fn main() {
    let gestures = Gestures::new();
    let stack = Rc::new(RefCell::new(NavigationStack::new(Printer)));
    NavigationStack::bind_back(&stack, &gestures);

    let mut bar = NavBar::new("App");
    {
        let s = stack.borrow();
        bar.bind(s.events(), &s.change());
    }

    let mut now = Duration::ZERO;
    let mut settle = |stack: &Rc<RefCell<NavigationStack<Screen, Printer>>>| {
        now += Duration::from_millis(600);
        stack.borrow_mut().advance_to(now);
    };

    stack.borrow_mut().show();
    for name in ["Inbox", "Thread", "Attachment"] {
        println!("== push {name} ==");
        stack.borrow_mut().push(Screen(name));
        settle(&stack);
        println!("  bar: {:?} back={}", bar.title(), bar.back_visible());
    }

    loop {
        println!("== back gesture ==");
        let consumed = gestures.emit_back();
        settle(&stack);
        println!(
            "  consumed={consumed} bar: {:?} back={}",
            bar.title(),
            bar.back_visible()
        );
        if !consumed {
            break;
        }
    }
}

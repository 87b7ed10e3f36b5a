/// One activation of a parse rule: two label cells, reserved lazily by
/// `GN1`/`GN2` and stable for the frame's lifetime, plus the instruction
/// index to resume at on `R`.
///
/// The bootstrap source keeps three independent stacks (label1, label2,
/// return-pc) — three parallel `Vec`s that must always stay the same
/// length. A single stack of frame records is the correct model: the
/// three-stack layout was an implementation accident, not a semantic
/// requirement.
#[derive(Clone, Debug, Default)]
pub struct Frame {
    label1: Option<String>,
    label2: Option<String>,
    pub return_pc: usize,
}

impl Frame {
    pub fn new(return_pc: usize) -> Frame {
        Frame {
            label1: None,
            label2: None,
            return_pc,
        }
    }
}

/// Generates fresh synthetic labels (`"L" + n`, monotonically increasing)
/// and manages the call stack of [`Frame`]s, including the bottom sentinel
/// whose presence makes a top-level `R` halt the VM instead of underflowing.
pub struct ActivationStack {
    frames: Vec<Frame>,
    label_counter: u32,
}

impl ActivationStack {
    /// `sentinel_return_pc` is "one past the end of the program" — an `R`
    /// popping the sentinel transitions the VM to Halted-OK rather than
    /// resuming at any real instruction.
    pub fn new(sentinel_return_pc: usize) -> ActivationStack {
        ActivationStack {
            frames: vec![Frame::new(sentinel_return_pc)],
            label_counter: 0,
        }
    }

    pub fn call(&mut self, return_pc: usize) {
        self.frames.push(Frame::new(return_pc));
    }

    /// Pops the top frame unless it is the sentinel, returning its
    /// `return_pc`. `None` means "this was the outermost return — halt."
    pub fn ret(&mut self) -> Option<usize> {
        if self.frames.len() <= 1 {
            None
        } else {
            self.frames.pop().map(|frame| frame.return_pc)
        }
    }

    pub fn depth(&self) -> usize {
        self.frames.len()
    }

    fn top_mut(&mut self) -> &mut Frame {
        self.frames.last_mut().expect("sentinel frame is never popped")
    }

    pub fn gn1(&mut self) -> &str {
        if self.top_mut().label1.is_none() {
            let fresh = self.fresh_label();
            self.top_mut().label1 = Some(fresh);
        }
        self.top_mut().label1.as_deref().unwrap()
    }

    pub fn gn2(&mut self) -> &str {
        if self.top_mut().label2.is_none() {
            let fresh = self.fresh_label();
            self.top_mut().label2 = Some(fresh);
        }
        self.top_mut().label2.as_deref().unwrap()
    }

    fn fresh_label(&mut self) -> String {
        let label = format!("L{}", self.label_counter);
        self.label_counter += 1;
        label
    }
}

/// Alternates a title between its plain form and a bracketed one.
#[derive(Clone, Debug)]
pub struct TitleFlasher {
    plain: String,
    decorated: String,
    showing_decorated: bool,
}

impl TitleFlasher {
    pub fn new(title: &str, left: &str, right: &str) -> Self {
        Self {
            plain: title.to_string(),
            decorated: format!("{left}{title}{right}"),
            showing_decorated: false,
        }
    }

    /// Flip to the other variant and return it.
    pub fn tick(&mut self) -> &str {
        self.showing_decorated = !self.showing_decorated;
        self.current()
    }

    pub fn current(&self) -> &str {
        if self.showing_decorated {
            &self.decorated
        } else {
            &self.plain
        }
    }
}

use std::fmt::{Display, Formatter};

/// Renders a slice as `[a, b, c]`, eliding everything past `limit` items as `… n more`.
pub struct DisplayList<'a, D: Display> {
    items: &'a [D],
    limit: Option<usize>,
}
impl<'a, D: Display> DisplayList<'a, D> {
    pub fn limited(items: &'a [D], limit: usize) -> Self {
        Self {
            items,
            limit: Some(limit),
        }
    }
}

impl<'a, D: Display> Display for DisplayList<'a, D> {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "[")?;
        let shown = self.limit.unwrap_or(self.items.len()).min(self.items.len());
        for (index, item) in self.items[..shown].iter().enumerate() {
            if index != 0 {
                write!(f, ", ")?;
            }
            write!(f, "{item}")?;
        }
        let hidden = self.items.len() - shown;
        if hidden > 0 {
            if shown > 0 {
                write!(f, ", ")?;
            }
            write!(f, "… {hidden} more")?;
        }
        write!(f, "]")
    }
}

impl<'a, D: Display> From<&'a [D]> for DisplayList<'a, D> {
    fn from(items: &'a [D]) -> Self {
        DisplayList { items, limit: None }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::coords;

    #[test]
    fn display_list() {
        let points = coords(&[(16, 88), (23, 21), (34, 89)]);
        assert_eq!("[(16,88), (23,21), (34,89)]", format!("{}", DisplayList::from(&*points)));

        let empty: Vec<usize> = vec![];
        assert_eq!("[]", format!("{}", DisplayList::from(&*empty)));
    }

    #[test]
    fn display_list_limited() {
        let points = coords(&[(16, 88), (23, 21), (34, 89)]);
        assert_eq!("[(16,88), … 2 more]", DisplayList::limited(&points, 1).to_string());
        assert_eq!("[… 3 more]", DisplayList::limited(&points, 0).to_string());
        assert_eq!(
            "[(16,88), (23,21), (34,89)]",
            DisplayList::limited(&points, 10).to_string()
        );
    }
}

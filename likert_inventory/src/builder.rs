use crate::catalog::Catalog;
pub use crate::config::*;

/// A builder for collecting the answers of one respondent.
///
/// This is the shape in which a form hands over its answers: one selection
/// per item, where a later selection replaces an earlier one.
///
/// ```
/// use likert_inventory::builder::ResponseBuilder;
/// use likert_inventory::{compute_scores, Catalog, InventoryErrors};
///
/// let catalog = Catalog::reference();
/// let mut builder = ResponseBuilder::new(&catalog);
///
/// builder.select("RES01", "4")?;
/// builder.select("RES04", "2")?;
/// builder.select("RES05", "N/A")?;
///
/// let summary = compute_scores(&catalog, &builder.build());
/// assert_eq!(summary.overall, 4.0);
///
/// # Ok::<(), InventoryErrors>(())
/// ```
pub struct ResponseBuilder<'a> {
    pub(crate) _catalog: &'a Catalog,
    pub(crate) _response: Response,
}

impl<'a> ResponseBuilder<'a> {
    pub fn new(catalog: &'a Catalog) -> ResponseBuilder<'a> {
        ResponseBuilder {
            _catalog: catalog,
            _response: Response::new(),
        }
    }

    /// Records the raw content of a form cell for the given item.
    ///
    /// Blank content clears any previous answer: the item is left unanswered.
    pub fn select(&mut self, item_id: &str, raw: &str) -> Result<(), InventoryErrors> {
        match Answer::parse(raw) {
            Some(answer) => self.select_answer(item_id, answer),
            None => self.clear(item_id),
        }
    }

    pub fn select_answer(&mut self, item_id: &str, answer: Answer) -> Result<(), InventoryErrors> {
        self.check_item(item_id)?;
        self._response.select(item_id, answer);
        Ok(())
    }

    pub fn clear(&mut self, item_id: &str) -> Result<(), InventoryErrors> {
        self.check_item(item_id)?;
        self._response.answers.remove(item_id);
        Ok(())
    }

    pub fn build(self) -> Response {
        self._response
    }

    fn check_item(&self, item_id: &str) -> Result<(), InventoryErrors> {
        if self._catalog.get(item_id).is_none() {
            return Err(InventoryErrors::UnknownItem(item_id.to_string()));
        }
        Ok(())
    }
}

/// A user-defined function: its parameter names and the pre-tokenised body.
///
/// By convention row 0 of `body` holds the raw parameter list and execution
/// starts at row 1, mirroring how the definition loader stores functions.
#[derive(Debug, Clone, PartialEq)]
pub struct Function {
    /// Ordered parameter names; call arguments bind positionally.
    pub params: Vec<String>,
    /// Token matrix of the function body.
    pub body: Vec<Vec<String>>,
}

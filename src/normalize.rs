pub(crate) mod ir;
pub(crate) mod pass;

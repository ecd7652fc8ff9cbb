pub(crate) mod corpus;
pub(crate) mod fonts;

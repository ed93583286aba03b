mod shake;

pub(crate) use crate::hash::shake::SpxHasher;

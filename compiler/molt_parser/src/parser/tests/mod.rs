mod diagnostics;
mod expressions;

pub(crate) fn indent(depth: usize) -> String {
    " ".repeat(depth * 3)
}

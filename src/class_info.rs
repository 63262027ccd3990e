#[derive(Debug, Clone, PartialEq)]
pub struct ClassInfo {
    pub object_id: i32,
    pub name: String,
    pub display_name: String,
    pub member_names: Vec<String>,
}

impl ClassInfo {
    pub fn new(object_id: i32, name: String, member_names: Vec<String>) -> Self {
        let display_name = derive_display_name(&name);
        Self {
            object_id,
            name,
            display_name,
            member_names,
        }
    }
}

fn derive_display_name(name: &str) -> String {
    let generic_cut = name.find("[[");
    let arity_cut = name.find('`');
    let cut = [generic_cut, arity_cut].into_iter().flatten().min();
    match cut {
        Some(idx) => name[..idx].to_string(),
        None => name.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strips_arity_and_assembly_qualification() {
        assert_eq!(derive_display_name("Foo.Bar`1[[Sys.Int32, mscorlib]]"), "Foo.Bar");
    }

    #[test]
    fn leaves_plain_name_untouched() {
        assert_eq!(derive_display_name("Plain.Name"), "Plain.Name");
    }

    #[test]
    fn handles_assembly_qualification_without_arity() {
        assert_eq!(derive_display_name("My.Type[[Sys.Int32, mscorlib]]"), "My.Type");
    }
}

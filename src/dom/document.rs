use super::Dom;

/// Handle to an element in a [`Document`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ElementId(usize);

/// What an element is; decides which of its attributes are meaningful.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ElementKind {
    /// A layout region such as the main content area.
    Region,
    Form,
    /// Field-row container wrapping one field and its label.
    Row,
    TextInput,
    Checkbox,
    /// A single-choice select; options are `(value, label)` pairs.
    Select { options: Vec<(String, String)> },
    Hidden,
}

impl ElementKind {
    fn carries_value(&self) -> bool {
        matches!(
            self,
            Self::TextInput | Self::Checkbox | Self::Select { .. } | Self::Hidden
        )
    }
}

/// An element and its attributes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Element {
    pub kind: ElementKind,
    pub id: Option<String>,
    pub name: Option<String>,
    /// Label shown by hosts that render the page themselves.
    pub label: Option<String>,
    pub value: String,
    pub checked: bool,
    pub readonly: bool,
    /// `false` once the element's display style has been set to none.
    pub displayed: bool,
}

impl Element {
    fn new(kind: ElementKind) -> Self {
        Self {
            kind,
            id: None,
            name: None,
            label: None,
            value: String::new(),
            checked: false,
            readonly: false,
            displayed: true,
        }
    }

    pub fn region(id: &str) -> Self {
        Self::new(ElementKind::Region).with_id(id)
    }

    pub fn form(id: &str) -> Self {
        Self::new(ElementKind::Form).with_id(id)
    }

    pub fn row() -> Self {
        Self::new(ElementKind::Row)
    }

    pub fn text(id: &str, name: &str) -> Self {
        Self::new(ElementKind::TextInput).with_id(id).with_name(name)
    }

    /// A checkbox submitting `value` when checked.
    pub fn checkbox(id: &str, name: &str, value: &str) -> Self {
        Self::new(ElementKind::Checkbox)
            .with_id(id)
            .with_name(name)
            .with_value(value)
    }

    /// A select starting on its first option.
    pub fn select(id: &str, name: &str, options: Vec<(String, String)>) -> Self {
        let value = options.first().map(|(v, _)| v.clone()).unwrap_or_default();
        Self::new(ElementKind::Select { options })
            .with_id(id)
            .with_name(name)
            .with_value(value)
    }

    pub fn hidden(name: &str, value: &str) -> Self {
        Self::new(ElementKind::Hidden)
            .with_name(name)
            .with_value(value)
    }

    pub fn with_id(mut self, id: &str) -> Self {
        self.id = Some(id.to_string());
        self
    }

    pub fn with_name(mut self, name: &str) -> Self {
        self.name = Some(name.to_string());
        self
    }

    pub fn with_label(mut self, label: &str) -> Self {
        self.label = Some(label.to_string());
        self
    }

    pub fn with_value(mut self, value: impl Into<String>) -> Self {
        self.value = value.into();
        self
    }

    pub fn with_checked(mut self, checked: bool) -> Self {
        self.checked = checked;
        self
    }

    pub fn readonly(mut self) -> Self {
        self.readonly = true;
        self
    }

    /// Returns `true` for inputs an operator can change.
    pub fn is_editable(&self) -> bool {
        !self.readonly
            && matches!(
                self.kind,
                ElementKind::TextInput | ElementKind::Checkbox | ElementKind::Select { .. }
            )
    }
}

#[derive(Debug, Clone)]
struct Node {
    element: Element,
    parent: Option<ElementId>,
    children: Vec<ElementId>,
}

/// An in-memory page: a tree of [`Element`]s plus the page path.
///
/// Used as the page model of the terminal host and as the fake page in tests.
#[derive(Debug, Clone, Default)]
pub struct Document {
    path: String,
    nodes: Vec<Node>,
    roots: Vec<ElementId>,
}

impl Document {
    /// Creates an empty document located at `path`.
    pub fn new(path: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            nodes: Vec::new(),
            roots: Vec::new(),
        }
    }

    /// Appends `element` as the last child of `parent`, or as a new root.
    ///
    /// # Panics
    ///
    /// Panics if `parent` does not belong to this document.
    pub fn append(&mut self, parent: Option<ElementId>, element: Element) -> ElementId {
        let id = ElementId(self.nodes.len());
        self.nodes.push(Node {
            element,
            parent,
            children: Vec::new(),
        });
        match parent {
            Some(p) => self.nodes[p.0].children.push(id),
            None => self.roots.push(id),
        }
        id
    }

    pub fn get(&self, id: ElementId) -> Option<&Element> {
        self.nodes.get(id.0).map(|n| &n.element)
    }

    pub fn get_mut(&mut self, id: ElementId) -> Option<&mut Element> {
        self.nodes.get_mut(id.0).map(|n| &mut n.element)
    }

    pub fn parent(&self, id: ElementId) -> Option<ElementId> {
        self.nodes.get(id.0).and_then(|n| n.parent)
    }

    pub fn children(&self, id: ElementId) -> &[ElementId] {
        self.nodes
            .get(id.0)
            .map(|n| n.children.as_slice())
            .unwrap_or(&[])
    }

    /// Iterates over the strict ancestors of `id`, nearest first.
    pub fn ancestors(&self, id: ElementId) -> impl Iterator<Item = ElementId> + '_ {
        std::iter::successors(self.parent(id), move |&p| self.parent(p))
    }

    /// All elements in document (pre-)order.
    pub fn ids(&self) -> Vec<ElementId> {
        let mut out = Vec::with_capacity(self.nodes.len());
        for &root in &self.roots {
            self.collect_subtree(root, &mut out);
        }
        out
    }

    /// `root` and everything below it, in document order.
    pub fn subtree(&self, root: ElementId) -> Vec<ElementId> {
        let mut out = Vec::new();
        if self.get(root).is_some() {
            self.collect_subtree(root, &mut out);
        }
        out
    }

    fn collect_subtree(&self, id: ElementId, out: &mut Vec<ElementId>) {
        out.push(id);
        for &child in self.children(id) {
            self.collect_subtree(child, out);
        }
    }

    /// Returns `true` if the element and all of its ancestors are displayed.
    pub fn is_rendered(&self, id: ElementId) -> bool {
        std::iter::once(id)
            .chain(self.ancestors(id))
            .all(|i| self.get(i).is_some_and(|e| e.displayed))
    }

    pub fn path(&self) -> &str {
        &self.path
    }

    fn nearest_ancestor(&self, id: ElementId, kind: &ElementKind) -> Option<ElementId> {
        self.ancestors(id)
            .find(|&a| self.get(a).is_some_and(|e| &e.kind == kind))
    }
}

impl Dom for Document {
    type Element = ElementId;

    fn element_by_id(&self, id: &str) -> Option<ElementId> {
        self.ids()
            .into_iter()
            .find(|&i| self.get(i).and_then(|e| e.id.as_deref()) == Some(id))
    }

    fn elements_by_name(&self, name: &str) -> Vec<ElementId> {
        self.ids()
            .into_iter()
            .filter(|&i| self.get(i).and_then(|e| e.name.as_deref()) == Some(name))
            .collect()
    }

    fn value(&self, element: &ElementId) -> String {
        self.get(*element)
            .filter(|e| e.kind.carries_value())
            .map(|e| e.value.clone())
            .unwrap_or_default()
    }

    fn set_value(&mut self, element: &ElementId, value: &str) {
        if let Some(e) = self.get_mut(*element)
            && e.kind.carries_value()
        {
            e.value = value.to_string();
        }
    }

    fn is_checked(&self, element: &ElementId) -> bool {
        self.get(*element)
            .is_some_and(|e| e.kind == ElementKind::Checkbox && e.checked)
    }

    fn set_checked(&mut self, element: &ElementId, checked: bool) {
        if let Some(e) = self.get_mut(*element)
            && e.kind == ElementKind::Checkbox
        {
            e.checked = checked;
        }
    }

    fn closest_row(&self, element: &ElementId) -> Option<ElementId> {
        self.nearest_ancestor(*element, &ElementKind::Row)
    }

    fn set_displayed(&mut self, element: &ElementId, displayed: bool) {
        if let Some(e) = self.get_mut(*element) {
            e.displayed = displayed;
        }
    }

    fn is_form(&self, element: &ElementId) -> bool {
        self.get(*element).is_some_and(|e| e.kind == ElementKind::Form)
    }

    fn closest_form(&self, element: &ElementId) -> Option<ElementId> {
        self.nearest_ancestor(*element, &ElementKind::Form)
    }

    fn form_within(&self, container_id: &str) -> Option<ElementId> {
        let container = self.element_by_id(container_id)?;
        self.subtree(container)
            .into_iter()
            .skip(1)
            .find(|&i| self.is_form(&i))
    }

    fn location_path(&self) -> String {
        self.path.clone()
    }
}

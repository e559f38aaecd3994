use egui::{Pos2, Rect, Vec2};

/// The three visual tiers of the timeline.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum ElementKind {
    Day,
    Month,
    Year,
}

impl ElementKind {
    pub const ALL: [ElementKind; 3] = [ElementKind::Day, ElementKind::Month, ElementKind::Year];

    /// Short lowercase identifier, e.g. `"month"`.
    pub fn id(self) -> &'static str {
        match self {
            ElementKind::Day => "day",
            ElementKind::Month => "month",
            ElementKind::Year => "year",
        }
    }

    /// Name used to register the element category with a host, e.g. `"KindMonth"`.
    pub fn kind(self) -> &'static str {
        match self {
            ElementKind::Day => "KindDay",
            ElementKind::Month => "KindMonth",
            ElementKind::Year => "KindYear",
        }
    }

    pub fn is_supplementary(self) -> bool {
        !matches!(self, ElementKind::Day)
    }
}

/// Composite identity of one placement: its tier plus its index within the tier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ElementKey {
    pub kind: ElementKind,
    pub index: usize,
}

impl ElementKey {
    pub fn day(index: usize) -> Self {
        Self { kind: ElementKind::Day, index }
    }

    pub fn month(index: usize) -> Self {
        Self { kind: ElementKind::Month, index }
    }

    pub fn year(index: usize) -> Self {
        Self { kind: ElementKind::Year, index }
    }
}

/// Scale about the frame center, then translate.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Transform {
    pub scale: Vec2,
    pub translation: Vec2,
}

impl Default for Transform {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl Transform {
    pub const IDENTITY: Transform = Transform {
        scale: Vec2::new(1.0, 1.0),
        translation: Vec2::ZERO,
    };

    pub fn scale(x: f32, y: f32) -> Self {
        Self {
            scale: Vec2::new(x, y),
            translation: Vec2::ZERO,
        }
    }

    pub fn translation(x: f32, y: f32) -> Self {
        Self {
            scale: Vec2::new(1.0, 1.0),
            translation: Vec2::new(x, y),
        }
    }

    pub fn is_identity(&self) -> bool {
        *self == Self::IDENTITY
    }

    /// Map `frame` through this transform, anchored at the frame center.
    pub fn apply(&self, frame: Rect) -> Rect {
        let size = Vec2::new(frame.width() * self.scale.x, frame.height() * self.scale.y);
        Rect::from_center_size(frame.center() + self.translation, size)
    }
}

/// A computed rectangle plus identity for one visual element.
///
/// `frame` is the untransformed geometry as built; `transform` is identity inside
/// the cache and only set on copies handed out by queries.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Placement {
    pub key: ElementKey,
    pub frame: Rect,
    pub transform: Transform,
}

impl Placement {
    pub fn new(key: ElementKey, x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            key,
            frame: Rect::from_min_size(Pos2::new(x, y), Vec2::new(width, height)),
            transform: Transform::IDENTITY,
        }
    }

    pub fn kind(&self) -> ElementKind {
        self.key.kind
    }

    /// Frame after applying the transform.
    pub fn rendered_frame(&self) -> Rect {
        self.transform.apply(self.frame)
    }

    pub fn rendered_center(&self) -> Pos2 {
        self.rendered_frame().center()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn kind_names_derive_from_the_variant() {
        assert_eq!(ElementKind::Day.id(), "day");
        assert_eq!(ElementKind::Month.kind(), "KindMonth");
        assert_eq!(ElementKind::Year.kind(), "KindYear");
        assert!(!ElementKind::Day.is_supplementary());
        assert!(ElementKind::Year.is_supplementary());
    }

    #[test]
    fn scale_is_anchored_at_the_center() {
        let p = Placement {
            transform: Transform::scale(10.0, 1.0),
            ..Placement::new(ElementKey::day(0), 10.0, 0.0, 2.0, 30.0)
        };
        let r = p.rendered_frame();
        assert_eq!(r.center(), p.frame.center());
        assert_eq!(r.width(), 20.0);
        assert_eq!(r.height(), 30.0);
        assert_eq!(r.min.x, 1.0);
    }

    #[test]
    fn translation_moves_without_resizing() {
        let p = Placement {
            transform: Transform::translation(5.0, 0.0),
            ..Placement::new(ElementKey::year(0), 0.0, 0.0, 30.0, 11.0)
        };
        let r = p.rendered_frame();
        assert_eq!(r.min.x, 5.0);
        assert_eq!(r.width(), 30.0);
    }
}

//! Style rules appended to `<head>` once at startup.
//!
//! These back the classes and animation names the controller toggles, so the
//! effects work even when the site stylesheet does not define them.

pub const PAGE_CSS: &str = r#"
@keyframes ripple {
    to {
        transform: scale(4);
        opacity: 0;
    }
}

@keyframes float {
    0%, 100% { transform: translateY(0); }
    50% { transform: translateY(-10px); }
}

@keyframes dash {
    to { stroke-dashoffset: -20; }
}

.floating {
    animation: float 6s ease-in-out infinite;
}

.fade-in {
    opacity: 1 !important;
    transform: translateY(0) !important;
}

.scrolled {
    background: rgba(15, 23, 42, 0.8) !important;
    backdrop-filter: blur(20px) !important;
}

[data-theme="light"] .scrolled {
    background: rgba(255, 255, 255, 0.9) !important;
}
"#;

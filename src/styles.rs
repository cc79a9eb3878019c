use wasm_bindgen::JsValue;
use web_sys::Document;

/// Rules the behaviours depend on, in case the page stylesheet lacks them.
pub const BEHAVIOUR_CSS: &str = r#"
    .animated {
        opacity: 1 !important;
        transform: translateY(0) !important;
    }

    @media (max-width: 904px) {
        .nav-menu {
            position: fixed;
            top: 80px;
            left: 0;
            right: 0;
            background-color: var(--color-white);
            box-shadow: var(--elevation-3);
            padding: var(--spacing-lg);
            transform: translateY(-100%);
            opacity: 0;
            visibility: hidden;
            transition: all 0.3s ease-out;
        }

        .nav-menu--open {
            transform: translateY(0);
            opacity: 1;
            visibility: visible;
        }

        .nav-list {
            flex-direction: column;
            gap: 0;
        }

        .nav-link {
            display: block;
            padding: var(--spacing-md);
            border-radius: var(--radius-sm);
        }

        .menu-open {
            overflow: hidden;
        }
    }

    .fab {
        opacity: 0;
        visibility: hidden;
        transition: opacity 0.3s ease-out, visibility 0.3s ease-out, transform 0.2s ease-out;
    }

    .form-input.error,
    .form-textarea.error {
        border-color: #dc2626 !important;
        background-color: #fef2f2;
    }
"#;

pub fn inject(document: &Document) -> Result<(), JsValue> {
    let Some(head) = document.head() else {
        return Ok(());
    };
    let style = document.create_element("style")?;
    style.set_text_content(Some(BEHAVIOUR_CSS));
    head.append_child(&style)?;
    Ok(())
}
